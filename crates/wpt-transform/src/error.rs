//! Error types for the combine and munge stages.

use std::path::PathBuf;

use thiserror::Error;
use wpt_model::TableError;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Table(#[from] TableError),

    /// Combine was asked to merge an empty source list.
    #[error("no source files to combine into {target}")]
    NoSources { target: PathBuf },

    /// A sanitize rule pattern failed to compile.
    #[error("invalid sanitize rule '{name}': {source}")]
    InvalidRule {
        name: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
