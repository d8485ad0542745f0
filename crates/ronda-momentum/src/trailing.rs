//! Trailing cumulative log-return momentum, lagged by one period.

use polars::prelude::*;
use ronda_core::{Panel, Result, RondaError};
use serde::{Deserialize, Serialize};

/// Name of the momentum column attached to the panel.
pub const MOMENTUM_COLUMN: &str = "momentum";

/// Trailing momentum computer.
///
/// For each security, momentum at month `t` is the sum of `ln(1 + ret)`
/// over the `window` months ending at `t - 1`. The one-period lag means a
/// month's own return never feeds its own momentum value. The value is
/// undefined (null) for the first `window` months of a security's history,
/// so a security with a history no longer than the window never receives a
/// defined momentum at all.
///
/// # Example
///
/// ```ignore
/// use ronda_momentum::TrailingMomentum;
///
/// // Classic 12-month formation window
/// let momentum = TrailingMomentum::default();
/// let with_momentum = momentum.compute(&panel)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailingMomentum {
    window: usize,
}

impl TrailingMomentum {
    /// Create a momentum computer with the given formation window (in
    /// months).
    #[must_use]
    pub const fn new(window: usize) -> Self {
        Self { window }
    }

    /// Get the formation window in months.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Columns the input panel must carry.
    #[must_use]
    pub const fn required_columns() -> &'static [&'static str] {
        &["permno", "ret"]
    }

    /// Attach the momentum column to a panel.
    ///
    /// The input panel must be sorted by (permno, year, month); securities
    /// are detected as maximal runs of equal `permno` values. The returned
    /// panel carries all original columns plus [`MOMENTUM_COLUMN`]; an
    /// existing momentum column is replaced, so recomputing with a new
    /// window on the same panel is safe.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is zero, a required column is
    /// missing, or the identifier/return columns contain nulls.
    pub fn compute(&self, panel: &Panel) -> Result<Panel> {
        if self.window == 0 {
            return Err(RondaError::InvalidData(
                "momentum window must be at least 1".to_string(),
            ));
        }

        for col in Self::required_columns() {
            if !panel.has_column(col) {
                return Err(RondaError::MissingColumn((*col).to_string()));
            }
        }

        let df = panel.data();

        let id_col = df.column("permno")?;
        if id_col.null_count() > 0 {
            return Err(RondaError::InvalidData(
                "null value in permno column".to_string(),
            ));
        }
        let ids: Vec<i64> = id_col
            .as_materialized_series()
            .i64()?
            .into_iter()
            .flatten()
            .collect();

        let ret_col = df.column("ret")?;
        if ret_col.null_count() > 0 {
            return Err(RondaError::InvalidData(
                "null value in ret column".to_string(),
            ));
        }
        let rets: Vec<f64> = ret_col
            .as_materialized_series()
            .f64()?
            .into_iter()
            .flatten()
            .collect();

        let mut momentum: Vec<Option<f64>> = Vec::with_capacity(rets.len());
        let mut start = 0;
        while start < ids.len() {
            let mut end = start + 1;
            while end < ids.len() && ids[end] == ids[start] {
                end += 1;
            }
            momentum.extend(trailing_log_momentum(&rets[start..end], self.window));
            start = end;
        }

        let mut out = df.clone();
        out.with_column(Series::new(MOMENTUM_COLUMN.into(), momentum))?;
        Ok(Panel::new(out))
    }
}

impl Default for TrailingMomentum {
    fn default() -> Self {
        Self::new(12)
    }
}

/// Trailing sum of log returns over one security's time-ordered history.
///
/// Element `t` of the result is the sum of `ln(1 + returns[i])` for `i` in
/// `[t - window, t - 1]`, or `None` when fewer than `window` prior periods
/// exist. The first element is always `None`.
///
/// # Examples
///
/// ```
/// use ronda_momentum::trailing_log_momentum;
///
/// let returns = [0.10, 0.05, -0.02, 0.01];
/// let momentum = trailing_log_momentum(&returns, 2);
///
/// assert_eq!(momentum[0], None);
/// assert_eq!(momentum[1], None);
/// let expected = (1.10f64).ln() + (1.05f64).ln();
/// assert!((momentum[2].unwrap() - expected).abs() < 1e-12);
/// ```
#[must_use]
pub fn trailing_log_momentum(returns: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut prefix = Vec::with_capacity(returns.len() + 1);
    prefix.push(0.0);
    for ret in returns {
        let last: f64 = *prefix.last().unwrap_or(&0.0);
        prefix.push(last + (1.0 + ret).ln());
    }

    (0..returns.len())
        .map(|t| {
            if t >= window {
                Some(prefix[t] - prefix[t - window])
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn two_security_panel() -> Panel {
        // First security has 5 months of history, second only 2.
        let df = df! {
            "permno" => &[10001i64, 10001, 10001, 10001, 10001, 20002, 20002],
            "ret" => &[0.02, -0.01, 0.03, 0.00, 0.05, 0.10, -0.04],
        }
        .unwrap();
        Panel::new(df)
    }

    #[test]
    fn test_window_accessors() {
        let momentum = TrailingMomentum::new(6);
        assert_eq!(momentum.window(), 6);
        assert_eq!(TrailingMomentum::default().window(), 12);
    }

    #[test]
    fn test_trailing_log_momentum_values() {
        let returns = [0.02, -0.01, 0.03, 0.00, 0.05];
        let momentum = trailing_log_momentum(&returns, 3);

        assert_eq!(momentum[0], None);
        assert_eq!(momentum[1], None);
        assert_eq!(momentum[2], None);

        let expected3 = (1.02f64).ln() + (0.99f64).ln() + (1.03f64).ln();
        assert_abs_diff_eq!(momentum[3].unwrap(), expected3, epsilon = 1e-12);

        let expected4 = (0.99f64).ln() + (1.03f64).ln() + (1.00f64).ln();
        assert_abs_diff_eq!(momentum[4].unwrap(), expected4, epsilon = 1e-12);
    }

    #[test]
    fn test_no_lookahead() {
        let base = [0.02, -0.01, 0.03, 0.00, 0.05];
        let mut perturbed = base;
        perturbed[3] = 0.20;

        let momentum_base = trailing_log_momentum(&base, 3);
        let momentum_perturbed = trailing_log_momentum(&perturbed, 3);

        // The value at the perturbed period is unchanged; the next one moves.
        assert_eq!(momentum_base[3], momentum_perturbed[3]);
        assert_ne!(momentum_base[4], momentum_perturbed[4]);
    }

    #[test]
    fn test_short_history_all_undefined() {
        let returns = [0.01, 0.02, 0.03];
        let momentum = trailing_log_momentum(&returns, 3);
        assert!(momentum.iter().all(Option::is_none));

        let momentum = trailing_log_momentum(&returns, 12);
        assert!(momentum.iter().all(Option::is_none));
    }

    #[test]
    fn test_window_one_lags_by_one_period() {
        let returns = [0.10, 0.05];
        let momentum = trailing_log_momentum(&returns, 1);

        assert_eq!(momentum[0], None);
        assert_abs_diff_eq!(momentum[1].unwrap(), (1.10f64).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_compute_respects_security_boundaries() {
        let panel = two_security_panel();
        let with_momentum = TrailingMomentum::new(3).compute(&panel).unwrap();

        let values: Vec<Option<f64>> = with_momentum
            .data()
            .column(MOMENTUM_COLUMN)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();

        // First security: defined from its fourth month onwards.
        assert!(values[0].is_none());
        assert!(values[1].is_none());
        assert!(values[2].is_none());
        assert!(values[3].is_some());
        assert!(values[4].is_some());

        // Second security has only 2 months, never enough history.
        assert!(values[5].is_none());
        assert!(values[6].is_none());
    }

    #[test]
    fn test_compute_matches_pure_function() {
        let panel = two_security_panel();
        let with_momentum = TrailingMomentum::new(2).compute(&panel).unwrap();

        let values: Vec<Option<f64>> = with_momentum
            .data()
            .column(MOMENTUM_COLUMN)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();

        let expected = trailing_log_momentum(&[0.02, -0.01, 0.03, 0.00, 0.05], 2);
        assert_eq!(&values[..5], &expected[..]);
    }

    #[test]
    fn test_compute_zero_window_rejected() {
        let panel = two_security_panel();
        let result = TrailingMomentum::new(0).compute(&panel);
        assert!(matches!(result, Err(RondaError::InvalidData(_))));
    }

    #[test]
    fn test_compute_missing_column() {
        let df = df! {
            "permno" => &[1i64, 1],
        }
        .unwrap();
        let result = TrailingMomentum::new(3).compute(&Panel::new(df));
        assert!(matches!(result, Err(RondaError::MissingColumn(_))));
    }

    #[test]
    fn test_compute_does_not_mutate_input() {
        let panel = two_security_panel();
        let _ = TrailingMomentum::new(3).compute(&panel).unwrap();
        assert!(!panel.has_column(MOMENTUM_COLUMN));
    }
}
