//! Error types for the tab-delimited file model.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by header, row and table operations.
#[derive(Debug, Error)]
pub enum TableError {
    /// A column with this name already exists in the header.
    #[error("duplicate column: {column}")]
    DuplicateColumn { column: String },

    /// The column is not part of the header.
    #[error("unknown column: {column}")]
    UnknownColumn { column: String },

    /// Column insertion referenced an anchor the header does not contain.
    #[error("cannot insert column '{column}' after missing column '{anchor}'")]
    AnchorNotFound { anchor: String, column: String },

    /// Text had no header line to build a table from.
    #[error("input has no header line")]
    MissingHeader,

    /// Failed to read or write a file.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file is missing, empty, or has no header line.
    #[error("malformed source {path}: {reason}")]
    MalformedSource { path: PathBuf, reason: String },
}

impl TableError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unknown(column: &str) -> Self {
        Self::UnknownColumn {
            column: column.to_string(),
        }
    }

    /// Build a [`TableError::MalformedSource`] for `path`.
    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        Self::MalformedSource {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
