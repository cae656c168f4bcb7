//! Source file discovery for the combine stage.
//!
//! Result files are named after the test, view and run date, so the inputs of
//! one combine job are picked out of a data directory with a file-name
//! wildcard such as `Gallery-firstView-requestsData-20*.txt`.

pub mod discovery;
pub mod error;
pub mod pattern;

pub use discovery::{expand_pattern, list_files};
pub use error::{IngestError, Result};
pub use pattern::FilePattern;
