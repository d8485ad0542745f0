//! Trailing momentum computation for the Ronda research framework.
//!
//! This crate attaches a trailing cumulative log-return column to a return
//! panel. The momentum value assigned to a given month deliberately lags
//! the formation month by one period, so ranking on it never uses the
//! return being predicted.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod trailing;

// Re-export key types
pub use trailing::{MOMENTUM_COLUMN, TrailingMomentum, trailing_log_momentum};
