//! Error types for the Ronda framework.
//!
//! This module defines the error types used throughout the Ronda ecosystem,
//! covering panel validation, momentum computation, and strategy
//! aggregation.

use thiserror::Error;

/// The main error type for Ronda operations.
///
/// This enum encompasses all error cases that can occur when working with
/// return panels, momentum signals, and portfolio strategies.
#[derive(Debug, Error)]
pub enum RondaError {
    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from the panel.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error reading or writing a data file.
    #[error("Data load error: {0}")]
    DataLoad(String),

    /// A strategy run produced no usable long-short returns at all.
    ///
    /// This is a recoverable condition (not a crash): the caller reports it
    /// and moves on to the next parameter combination.
    #[error("No usable strategy returns were produced")]
    NoUsableReturns,
}

/// A specialized Result type for Ronda operations.
///
/// This is a convenience type that uses [`RondaError`] as the error type.
pub type Result<T> = std::result::Result<T, RondaError>;
