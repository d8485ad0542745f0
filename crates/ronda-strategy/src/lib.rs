//! Decile portfolio formation and holding-period aggregation for Ronda.
//!
//! This crate provides the strategy engine of the workspace:
//! - Cross-sectional decile formation of winner/loser cohorts at each
//!   formation date
//! - Aggregation of long-short returns over overlapping holding windows
//! - Summary reports (mean, standard deviation, t-statistic) of the
//!   resulting monthly strategy return series
//!
//! # Example
//!
//! ```ignore
//! use ronda_momentum::TrailingMomentum;
//! use ronda_strategy::{aggregate_strategy, StrategySummary};
//!
//! let with_momentum = TrailingMomentum::new(12).compute(&panel)?;
//! let aggregates = aggregate_strategy(&with_momentum, 12, 3)?;
//! let summary = StrategySummary::from_aggregates(12, 3, &aggregates)?;
//! println!("{summary}");
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod formation;
pub mod holding;
pub mod report;

// Re-export main types
pub use formation::{DECILE_COUNT, FormationEvent, MIN_CROSS_SECTION, form_portfolio};
pub use holding::{MonthlyAggregate, aggregate_strategy};
pub use report::StrategySummary;
