#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core data types for the Ronda momentum research framework.
//!
//! This crate provides the foundational types shared by the momentum
//! calculator, the portfolio formation engine, and the command-line
//! driver: the return `Panel`, the common error types, and the summary
//! statistics used by the strategy reports.

/// The version of the ronda-core crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{Result, RondaError};
pub use stats::SummaryStats;
pub use types::{Date, Panel, SecurityId};
