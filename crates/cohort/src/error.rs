//! Error types for the Cohort library.
//!
//! These cover structural failures only: an unreadable source, a table
//! missing required columns, or a persistence problem. Row-level validation
//! failures are not errors; they are classified into
//! [`InvalidRecord`](crate::record::InvalidRecord)s by the loader.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Cohort operations.
#[derive(Debug, Error)]
pub enum CohortError {
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

    /// Source table is missing required columns.
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Empty file or no table to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the embedded SQLite store.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Error writing a derived artifact (JSON export, log file).
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for Cohort operations.
pub type Result<T> = std::result::Result<T, CohortError>;
