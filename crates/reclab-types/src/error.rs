//! Error types for reclab.

use thiserror::Error;

/// Result type alias for reclab operations.
pub type Result<T> = std::result::Result<T, ReclabError>;

/// Errors that can occur while acquiring datasets and reading their tables.
#[derive(Error, Debug)]
pub enum ReclabError {
    /// The fetch step was handed an empty URL.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The remote archive could not be transferred.
    #[error("Transfer failed: {0}")]
    Transfer(String),

    /// Extraction finished but declared tables are absent.
    #[error("Missing tables after extraction: {}", .0.join(", "))]
    MissingTables(Vec<String>),

    /// The table is not declared by the dataset manifest.
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// The dataset is not registered.
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    /// The archive could not be unpacked.
    #[error("Extraction error: {0}")]
    Extract(String),

    /// A table record could not be decoded.
    #[error("CSV error at line {line}: {message}")]
    Csv {
        /// Line of the table file the failing record starts on (1-based).
        line: u64,
        /// Decoder message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReclabError {
    /// Returns the missing table names if this is a [`ReclabError::MissingTables`].
    #[must_use]
    pub fn missing_tables(&self) -> Option<&[String]> {
        match self {
            Self::MissingTables(missing) => Some(missing),
            _ => None,
        }
    }
}
