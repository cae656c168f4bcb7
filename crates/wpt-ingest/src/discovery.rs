//! Directory listing and pattern expansion.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};
use crate::pattern::FilePattern;

/// Lists all regular files in a directory.
///
/// Returns files sorted by filename.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Resolves a file-name pattern inside `dir` to matching paths.
///
/// The pattern may carry leading directories (`raw/Gallery-*.txt`); wildcards
/// are only honored in the final component. Matches are sorted by file name,
/// which for date-stamped result files is also run order.
///
/// # Errors
///
/// Returns [`IngestError::NoMatches`] when nothing matches, in addition to
/// directory and pattern errors.
pub fn expand_pattern(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let relative = Path::new(pattern);
    let file_part = relative
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| IngestError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "pattern has no file name".to_string(),
        })?;
    let search_dir = match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => dir.join(parent),
        _ => dir.to_path_buf(),
    };

    let matcher = FilePattern::new(file_part)?;
    let matches: Vec<PathBuf> = list_files(&search_dir)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| matcher.matches(name))
        })
        .collect();

    debug!(
        dir = %search_dir.display(),
        pattern = matcher.as_str(),
        matches = matches.len(),
        "expanded pattern"
    );

    if matches.is_empty() {
        return Err(IngestError::NoMatches {
            dir: search_dir,
            pattern: pattern.to_string(),
        });
    }
    Ok(matches)
}
