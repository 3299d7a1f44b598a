//! Error types for fedtone.
//!
//! Only the boundaries fail: loading inputs, compiling rule tables and
//! writing tables. Structuring and scoring operations never return errors;
//! an unusable document yields an empty result instead.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for fedtone operations.
#[derive(Error, Debug)]
pub enum FedToneError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error for configs and rule tables.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule table entry is unusable (e.g. a pattern that does not compile).
    #[error("Rule table error: {0}")]
    Rules(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input record.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Result type alias for fedtone operations.
pub type Result<T> = std::result::Result<T, FedToneError>;

impl From<regex::Error> for FedToneError {
    fn from(err: regex::Error) -> Self {
        FedToneError::Rules(err.to_string())
    }
}
