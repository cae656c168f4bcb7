//! Error types for source discovery.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving source files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pattern could not be turned into a matcher.
    #[error("invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Pattern matched nothing.
    #[error("no files in {dir} match '{pattern}'")]
    NoMatches { dir: PathBuf, pattern: String },
}

/// Result type for discovery operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::NoMatches {
            dir: PathBuf::from("/data"),
            pattern: "Gallery-*.txt".to_string(),
        };
        assert_eq!(err.to_string(), "no files in /data match 'Gallery-*.txt'");
    }
}
