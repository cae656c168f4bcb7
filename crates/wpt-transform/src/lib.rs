//! Combine and munge stages for WebPageTest request data.
//!
//! `combine` concatenates per-run result files into one provenance-tagged
//! file; `munge` enriches a combined file with derived columns used by the
//! downstream reports.

pub mod combine;
pub mod content_group;
pub mod error;
pub mod hosts;
pub mod munge;
pub mod sanitize;

pub use combine::{CombineOptions, CombineSummary, ProvenanceColumns, SourceSummary, combine};
pub use content_group::content_group;
pub use error::{Result, TransformError};
pub use hosts::{DEFAULT_OWN_HOSTS, is_own_host};
pub use munge::{MungeOptions, MungeSummary, munge, munge_table};
pub use sanitize::{SanitizeRule, SanitizeRules};
