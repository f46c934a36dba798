//! Error types for the io layer.

use thiserror::Error;

/// Errors that can occur while reading or writing data files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally invalid CSV.
    #[error("CSV error at line {line}: {message}")]
    Csv {
        /// 1-based line where parsing failed.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
