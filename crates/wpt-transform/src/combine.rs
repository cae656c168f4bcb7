//! Combine stage: concatenate result files with provenance columns.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span, warn};
use wpt_model::{DEFAULT_DELIMITER, TableError};

use crate::error::{Result, TransformError};

/// Names of the provenance columns prepended to every combined row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceColumns {
    pub row_combined: String,
    pub file_name: String,
    pub file_number: String,
    pub row_original: String,
}

impl Default for ProvenanceColumns {
    fn default() -> Self {
        Self {
            row_combined: "RowCombined".to_string(),
            file_name: "FileNameOriginal".to_string(),
            file_number: "FileNumberOriginal".to_string(),
            row_original: "RowOriginal".to_string(),
        }
    }
}

impl ProvenanceColumns {
    pub fn names(&self) -> [&str; 4] {
        [
            self.row_combined.as_str(),
            self.file_name.as_str(),
            self.file_number.as_str(),
            self.row_original.as_str(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct CombineOptions {
    pub delimiter: char,
    pub provenance: ProvenanceColumns,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            provenance: ProvenanceColumns::default(),
        }
    }
}

/// Rows contributed by one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub path: PathBuf,
    pub file_number: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineSummary {
    pub target: PathBuf,
    pub sources: Vec<SourceSummary>,
    pub rows: usize,
}

struct SourceFile {
    path: PathBuf,
    name: String,
    header: String,
    lines: Vec<String>,
}

fn read_source(path: &Path) -> Result<SourceFile> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            TableError::malformed(path, "file not found")
        } else {
            TableError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let mut lines = text.split('\n');
    let header = lines.next().map(str::trim).unwrap_or_default();
    if header.is_empty() {
        let reason = if text.trim().is_empty() {
            "file is empty"
        } else {
            "missing header line"
        };
        return Err(TableError::malformed(path, reason).into());
    }
    let lines = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceFile {
        path: path.to_path_buf(),
        name,
        header: header.to_string(),
        lines,
    })
}

/// Merge `sources` into `target`, tagging each row with where it came from.
///
/// The output header is the provenance column names followed by the first
/// source's header. Each data row becomes
/// `global row, source file name, source number, row within source, line`,
/// with all counters 1-based. Sources keep the given order and their rows keep
/// file order. Blank lines are skipped.
///
/// Every source is read before `target` is opened, so a missing or malformed
/// source aborts the run without touching an existing target.
///
/// # Errors
///
/// - [`TransformError::NoSources`] for an empty source list.
/// - [`TableError::MalformedSource`] for a missing, empty or headerless source.
/// - [`TableError::Io`] for read or write failures.
pub fn combine(sources: &[PathBuf], target: &Path, options: &CombineOptions) -> Result<CombineSummary> {
    let span = info_span!("combine", output = %target.display(), sources = sources.len());
    let _guard = span.enter();
    let start = Instant::now();

    if sources.is_empty() {
        return Err(TransformError::NoSources {
            target: target.to_path_buf(),
        });
    }

    let loaded = sources
        .iter()
        .map(|path| read_source(path))
        .collect::<Result<Vec<_>>>()?;
    let first_header = loaded[0].header.as_str();
    for source in &loaded[1..] {
        if source.header != first_header {
            warn!(
                source = %source.path.display(),
                "header differs from first source; columns may not line up"
            );
        }
    }

    let summary =
        write_combined(&loaded, target, options).map_err(|source| TableError::Io {
            path: target.to_path_buf(),
            source,
        })?;

    info!(
        rows = summary.rows,
        duration_ms = start.elapsed().as_millis(),
        "combine complete"
    );
    Ok(summary)
}

fn write_combined(
    loaded: &[SourceFile],
    target: &Path,
    options: &CombineOptions,
) -> io::Result<CombineSummary> {
    let delimiter = options.delimiter;
    let mut writer = BufWriter::new(File::create(target)?);

    let separator = delimiter.to_string();
    let mut header = options.provenance.names().join(separator.as_str());
    header.push(delimiter);
    header.push_str(&loaded[0].header);
    writeln!(writer, "{header}")?;

    let mut row_combined = 0usize;
    let mut summaries = Vec::with_capacity(loaded.len());
    for (index, source) in loaded.iter().enumerate() {
        let file_number = index + 1;
        for (row_index, line) in source.lines.iter().enumerate() {
            row_combined += 1;
            let row_original = row_index + 1;
            writeln!(
                writer,
                "{row_combined}{delimiter}{name}{delimiter}{file_number}{delimiter}{row_original}{delimiter}{line}",
                name = source.name,
            )?;
        }
        debug!(
            source = %source.path.display(),
            file_number,
            rows = source.lines.len(),
            "combined source"
        );
        summaries.push(SourceSummary {
            path: source.path.clone(),
            file_number,
            rows: source.lines.len(),
        });
    }

    writer.into_inner().map_err(io::IntoInnerError::into_error)?;

    Ok(CombineSummary {
        target: target.to_path_buf(),
        sources: summaries,
        rows: row_combined,
    })
}
