//! Error types for snapshot comparison

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for snapshot comparison operations.
pub type Result<T> = std::result::Result<T, CompareError>;

/// Errors that can occur while comparing two snapshots.
///
/// Only `InvalidInput` ever stops a comparison. Parse and I/O failures are
/// logged and the affected file or directory pair is skipped.
#[derive(Error, Debug)]
pub enum CompareError {
    /// A snapshot path was empty, missing, or not a directory.
    #[error("Invalid snapshot input: {reason}")]
    InvalidInput {
        /// Description of what was wrong with the input.
        reason: String,
    },

    /// A structured-data file could not be decoded.
    #[error("Failed to parse JSON from {}: {source}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A file or directory could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File or directory that could not be read.
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CompareError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        CompareError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompareError::Io {
            path: path.into(),
            source,
        }
    }
}
