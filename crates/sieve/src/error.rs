//! Error types for the Sieve library.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::StorageType;

/// Main error type for Sieve operations.
///
/// Every variant except [`SieveError::Config`] and [`SieveError::Json`] is a
/// load failure: the table could not be produced and no check runs.
#[derive(Debug, Error)]
pub enum SieveError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Sieve operations.
pub type Result<T> = std::result::Result<T, SieveError>;

/// A check that could not execute.
///
/// These are recovered by the pipeline and recorded in the report's error
/// list; sibling checks still run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckError {
    /// A numeric bound was requested on a column that is not stored as numbers.
    #[error("cannot compare column '{column}' stored as {storage} against a numeric bound")]
    NonNumericColumn { column: String, storage: StorageType },
}
