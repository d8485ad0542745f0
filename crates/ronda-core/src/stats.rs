//! Summary statistics for monthly strategy return series.
//!
//! This module provides the sample moments and the t-statistic used by the
//! strategy reports.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Summary statistics of a return series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SummaryStats {
    /// The sample mean of the input values.
    pub mean: f64,
    /// The sample standard deviation (N-1 denominator).
    pub std: f64,
    /// The t-statistic of the mean: `mean / (std / sqrt(n))`.
    ///
    /// By convention this is positive infinity when the standard deviation
    /// is exactly zero and the mean is nonzero, and NaN when both are zero.
    pub t_stat: f64,
    /// Number of finite observations used.
    pub n_obs: usize,
}

/// Compute summary statistics for a slice of f64 values.
///
/// Uses sample standard deviation (N-1 denominator) for unbiased
/// estimation. Non-finite values are excluded from the calculation.
///
/// # Arguments
///
/// * `values` - The input values to summarize
///
/// # Edge Cases
///
/// - Empty input: mean=NaN, std=NaN, t_stat=NaN, n_obs=0
/// - Single value: std=0.0; the t-statistic follows the zero-std
///   convention above
///
/// # Examples
///
/// ```
/// use ronda_core::stats::summarize;
///
/// let values = vec![0.01, 0.02, 0.03, 0.04, 0.05];
/// let stats = summarize(&values);
///
/// assert_eq!(stats.n_obs, 5);
/// assert!((stats.mean - 0.03).abs() < 1e-12);
/// ```
pub fn summarize(values: &[f64]) -> SummaryStats {
    let finite_values: Vec<f64> = values.iter().filter(|x| x.is_finite()).copied().collect();

    if finite_values.is_empty() {
        return SummaryStats {
            mean: f64::NAN,
            std: f64::NAN,
            t_stat: f64::NAN,
            n_obs: 0,
        };
    }

    let n = finite_values.len();
    let mean = finite_values.iter().sum::<f64>() / n as f64;

    // Sample variance with N-1 denominator (Bessel's correction)
    let variance = if n > 1 {
        finite_values
            .iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64
    } else {
        0.0
    };
    let std = variance.sqrt();

    SummaryStats {
        mean,
        std,
        t_stat: t_statistic(mean, std, n),
        n_obs: n,
    }
}

/// Compute summary statistics for an ndarray `Array1`.
///
/// Uses sample standard deviation (ddof=1). This variant is convenient when
/// the return series is already held as an array.
///
/// # Arguments
///
/// * `values` - The input array to summarize
///
/// # Examples
///
/// ```
/// use ronda_core::stats::summarize_array;
/// use ndarray::Array1;
///
/// let values = Array1::from_vec(vec![0.01, 0.02, 0.03]);
/// let stats = summarize_array(&values);
///
/// assert_eq!(stats.n_obs, 3);
/// ```
pub fn summarize_array(values: &Array1<f64>) -> SummaryStats {
    if values.is_empty() {
        return SummaryStats {
            mean: f64::NAN,
            std: f64::NAN,
            t_stat: f64::NAN,
            n_obs: 0,
        };
    }

    let n = values.len();
    let mean = values.mean().unwrap_or(f64::NAN);
    let std = if n > 1 { values.std(1.0) } else { 0.0 };

    SummaryStats {
        mean,
        std,
        t_stat: t_statistic(mean, std, n),
        n_obs: n,
    }
}

/// The t-statistic of a sample mean.
///
/// Defined as `mean / (std / sqrt(n))`. A zero standard deviation with a
/// nonzero mean yields positive infinity by convention rather than a
/// division fault; a zero mean with zero deviation yields NaN.
fn t_statistic(mean: f64, std: f64, n: usize) -> f64 {
    if std > 0.0 {
        mean / (std / (n as f64).sqrt())
    } else if mean != 0.0 {
        f64::INFINITY
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_summarize_basic() {
        let values = vec![0.01, 0.02, 0.03, 0.04, 0.05];
        let stats = summarize(&values);

        assert_eq!(stats.n_obs, 5);
        assert_abs_diff_eq!(stats.mean, 0.03, epsilon = 1e-12);
        // Hand-computed sample std with N-1 denominator
        assert_abs_diff_eq!(stats.std, 0.015811388300841896, epsilon = 1e-12);
        assert_abs_diff_eq!(
            stats.t_stat,
            0.03 / (0.015811388300841896 / 5.0_f64.sqrt()),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_summarize_empty() {
        let values: Vec<f64> = vec![];
        let stats = summarize(&values);

        assert_eq!(stats.n_obs, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.std.is_nan());
        assert!(stats.t_stat.is_nan());
    }

    #[test]
    fn test_summarize_single_value() {
        let stats = summarize(&[0.02]);

        assert_eq!(stats.n_obs, 1);
        assert_abs_diff_eq!(stats.mean, 0.02, epsilon = 1e-15);
        assert_eq!(stats.std, 0.0);
        assert!(stats.t_stat.is_infinite() && stats.t_stat > 0.0);
    }

    #[test]
    fn test_summarize_constant_values() {
        let stats = summarize(&[0.01, 0.01, 0.01, 0.01]);

        assert_eq!(stats.std, 0.0);
        assert!(stats.t_stat.is_infinite() && stats.t_stat > 0.0);
    }

    #[test]
    fn test_summarize_all_zero() {
        let stats = summarize(&[0.0, 0.0, 0.0]);

        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std, 0.0);
        assert!(stats.t_stat.is_nan());
    }

    #[test]
    fn test_summarize_filters_non_finite() {
        let stats = summarize(&[0.01, f64::NAN, 0.03, f64::INFINITY]);

        assert_eq!(stats.n_obs, 2);
        assert_abs_diff_eq!(stats.mean, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_summarize_array_matches_slice() {
        let values = vec![0.012, -0.004, 0.031, 0.007, -0.019];
        let slice_stats = summarize(&values);
        let array_stats = summarize_array(&Array1::from_vec(values));

        assert_abs_diff_eq!(slice_stats.mean, array_stats.mean, epsilon = 1e-12);
        assert_abs_diff_eq!(slice_stats.std, array_stats.std, epsilon = 1e-12);
        assert_abs_diff_eq!(slice_stats.t_stat, array_stats.t_stat, epsilon = 1e-9);
    }

    #[test]
    fn test_summarize_array_empty() {
        let stats = summarize_array(&Array1::zeros(0));
        assert_eq!(stats.n_obs, 0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn test_negative_mean_t_stat_sign() {
        let stats = summarize(&[-0.02, -0.01, -0.03, -0.02]);
        assert!(stats.t_stat < 0.0);
    }
}
