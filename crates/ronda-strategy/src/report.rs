//! Strategy summary reports.

use crate::holding::MonthlyAggregate;
use ndarray::Array1;
use ronda_core::{Date, Result, RondaError, stats};
use serde::Serialize;
use std::fmt;

/// Summary of one (J, K) strategy run over its monthly return series.
#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    /// Formation window J in months.
    pub formation_window: usize,
    /// Holding window K in months.
    pub holding_window: usize,
    /// First holding month in the sample.
    pub start: Date,
    /// Last holding month in the sample.
    pub end: Date,
    /// Number of months in the sample.
    pub n_months: usize,
    /// Average monthly winner-minus-loser return.
    pub mean_return: f64,
    /// Sample standard deviation of the monthly returns.
    pub std_dev: f64,
    /// t-statistic of the mean monthly return.
    pub t_stat: f64,
}

impl StrategySummary {
    /// Summarize a monthly aggregate series for a (J, K) run.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty series; the aggregator never produces
    /// one, so this only guards direct misuse.
    pub fn from_aggregates(
        formation_window: usize,
        holding_window: usize,
        aggregates: &[MonthlyAggregate],
    ) -> Result<Self> {
        if aggregates.is_empty() {
            return Err(RondaError::InsufficientData(
                "no monthly aggregates to summarize".to_string(),
            ));
        }

        let returns = Array1::from_iter(aggregates.iter().map(|a| a.mean_return));
        let stats = stats::summarize_array(&returns);

        Ok(Self {
            formation_window,
            holding_window,
            start: aggregates[0].holding_date,
            end: aggregates[aggregates.len() - 1].holding_date,
            n_months: aggregates.len(),
            mean_return: stats.mean,
            std_dev: stats.std,
            t_stat: stats.t_stat,
        })
    }
}

impl fmt::Display for StrategySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(40);
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "Momentum Strategy Results (J={}, K={})",
            self.formation_window, self.holding_window
        )?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "Period: {} to {}",
            self.start.format("%Y-%m"),
            self.end.format("%Y-%m")
        )?;
        writeln!(f, "Number of Months in Sample: {}", self.n_months)?;
        writeln!(
            f,
            "Avg. Monthly Return (Winner-Loser): {:.4}%",
            self.mean_return * 100.0
        )?;
        writeln!(
            f,
            "Standard Deviation of Returns: {:.4}%",
            self.std_dev * 100.0
        )?;
        writeln!(f, "T-statistic: {:.2}", self.t_stat)?;
        write!(f, "{rule}")
    }
}
