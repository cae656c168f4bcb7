//! File-name wildcards (`*` and `?`).

use regex::Regex;

use crate::error::{IngestError, Result};

/// A compiled file-name wildcard.
///
/// `*` matches any run of characters and `?` exactly one; everything else is
/// literal. Matching is against the whole file name and is case-sensitive.
#[derive(Debug, Clone)]
pub struct FilePattern {
    raw: String,
    matcher: Regex,
}

impl FilePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() || pattern.contains(['/', '\\']) {
            return Err(IngestError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "expected a single file-name component".to_string(),
            });
        }
        let mut expr = String::with_capacity(pattern.len() + 8);
        expr.push('^');
        let mut literal = [0u8; 4];
        for ch in pattern.chars() {
            match ch {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                other => expr.push_str(&regex::escape(other.encode_utf8(&mut literal))),
            }
        }
        expr.push('$');
        let matcher = Regex::new(&expr).map_err(|e| IngestError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            matcher,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.matcher.is_match(file_name)
    }
}
