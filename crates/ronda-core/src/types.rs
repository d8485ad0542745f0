//! Common types used throughout the Ronda framework.
//!
//! This module defines the core data structures for representing the
//! security/month return panel and its temporal information.

use crate::error::{Result, RondaError};
use polars::prelude::*;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A security identifier.
///
/// Securities are identified by a stable integer id across the Ronda
/// framework, matching the `permno` column of the source data.
pub type SecurityId = i64;

/// Days from the Common Era to the Unix epoch.
///
/// Polars stores `Date` columns as days since the Unix epoch while chrono
/// counts days from the Common Era; this offset converts between the two.
pub const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Container for a panel of monthly security returns.
///
/// `Panel` wraps a Polars DataFrame containing one row per (security,
/// month) observation. It is built once by the loader and treated as
/// read-only afterwards.
///
/// # Expected Schema
///
/// - `permno`: security identifier (Int64)
/// - `date`: observation date (Date)
/// - `year`, `month`: calendar components of `date` (Int32)
/// - `ret`: fractional monthly total return (Float64, no nulls)
/// - `momentum`: optional derived column (Float64 with nulls, attached by
///   the momentum calculator)
///
/// # Invariants
///
/// Rows are sorted by (permno, year, month) and hold at most one
/// observation per (permno, date) pair.
///
/// # Example
///
/// ```no_run
/// use ronda_core::Panel;
/// use polars::prelude::*;
///
/// let df = df! {
///     "permno" => &[10001i64, 10001],
///     "ret" => &[0.012, -0.004],
/// }.unwrap();
///
/// let panel = Panel::new(df);
/// ```
#[derive(Debug, Clone)]
pub struct Panel {
    /// The underlying DataFrame containing the observations.
    data: DataFrame,
}

impl Panel {
    /// Creates a new `Panel` from a DataFrame.
    ///
    /// # Arguments
    ///
    /// * `data` - A Polars DataFrame containing panel observations
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Returns the number of observations in the panel.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the panel is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the column names in the panel.
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Checks if a column exists in the panel.
    ///
    /// # Arguments
    ///
    /// * `name` - The column name to check
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Materializes the `date` column as one [`Date`] per row.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is missing, is not of the Date
    /// dtype, or contains nulls.
    pub fn row_dates(&self) -> Result<Vec<Date>> {
        let date_col = self.data.column("date")?;
        let dates = date_col.as_materialized_series().date()?;

        let mut out = Vec::with_capacity(dates.len());
        for value in dates.into_iter() {
            let days: i32 = value
                .ok_or_else(|| RondaError::InvalidData("null value in date column".to_string()))?;
            let date = Date::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
                .ok_or_else(|| RondaError::InvalidDate(format!("out of range: {days}")))?;
            out.push(date);
        }
        Ok(out)
    }

    /// Returns the sorted sequence of distinct dates present in the panel.
    pub fn unique_dates(&self) -> Result<Vec<Date>> {
        let mut dates = self.row_dates()?;
        dates.sort();
        dates.dedup();
        Ok(dates)
    }
}

impl From<DataFrame> for Panel {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for Panel {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}
