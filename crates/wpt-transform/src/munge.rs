//! Munge stage: derive report columns on a combined requests file.

use std::io;
use std::path::Path;
use std::time::Instant;

use tracing::{info, info_span};
use wpt_model::{DEFAULT_DELIMITER, TableError, TabularFile};

use crate::content_group::content_group;
use crate::error::Result;
use crate::hosts::{DEFAULT_OWN_HOSTS, is_own_host};
use crate::sanitize::SanitizeRules;

pub const HOST: &str = "Host";
pub const URL: &str = "URL";
pub const CONTENT_TYPE: &str = "Content Type";
pub const CONTENT_GROUP: &str = "Content Group";
pub const OWN_HOSTED: &str = "IsVistaprintHosted";
pub const SANITIZED_URL: &str = "SanitizedURL";

#[derive(Debug, Clone)]
pub struct MungeOptions {
    pub delimiter: char,
    /// Substrings of `Host` that mark a request as own-hosted.
    pub own_hosts: Vec<String>,
    /// Applied in order to the URL of own-hosted requests.
    pub rules: SanitizeRules,
}

impl Default for MungeOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            own_hosts: DEFAULT_OWN_HOSTS.iter().map(|h| (*h).to_string()).collect(),
            rules: SanitizeRules::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MungeSummary {
    /// Summary rows (no `Host`) dropped before derivation.
    pub removed_rows: usize,
    /// Rows left in the output.
    pub rows: usize,
    /// Rows whose content type has no group.
    pub ungrouped: usize,
    pub own_hosted: usize,
    /// Rows whose sanitized URL differs from the raw URL.
    pub sanitized: usize,
}

/// Load `source`, derive columns, and write the result to `target`.
///
/// # Errors
///
/// - [`TableError::MalformedSource`] if `source` is missing or empty.
/// - [`TableError::Io`] for other read or write failures.
/// - Any error from [`munge_table`].
pub fn munge(source: &Path, target: &Path, options: &MungeOptions) -> Result<MungeSummary> {
    let span = info_span!(
        "munge",
        source = %source.display(),
        output = %target.display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let mut table =
        TabularFile::load_with_delimiter(source, options.delimiter).map_err(|err| match err {
            TableError::Io { source: io_err, .. } if io_err.kind() == io::ErrorKind::NotFound => {
                TableError::malformed(source, "file not found")
            }
            other => other,
        })?;
    let summary = munge_table(&mut table, options)?;
    table.write(target)?;

    info!(
        rows = summary.rows,
        duration_ms = start.elapsed().as_millis(),
        "munge complete"
    );
    Ok(summary)
}

/// Derive report columns in place.
///
/// Steps run in a fixed order since later ones read columns that earlier ones
/// insert, and rows are filtered before anything is derived:
///
/// 1. drop rows with an empty or unassigned `Host`
/// 2. `Content Group` after `Content Type`
/// 3. `IsVistaprintHosted` after `Host`
/// 4. `SanitizedURL` after `URL`
///
/// # Errors
///
/// [`TableError::UnknownColumn`] or [`TableError::AnchorNotFound`] when an
/// input column is missing, [`TableError::DuplicateColumn`] when the file was
/// already munged.
pub fn munge_table(table: &mut TabularFile, options: &MungeOptions) -> Result<MungeSummary> {
    let removed_rows = remove_summary_rows(table)?;
    info!(removed = removed_rows, "removed summary rows");

    let ungrouped = add_content_groups(table)?;
    info!(ungrouped, "generalized content types into content groups");

    let own_hosted = add_own_host_flags(table, &options.own_hosts)?;
    info!(own_hosted, "added own-host column");

    let sanitized = add_sanitized_urls(table, &options.rules)?;
    info!(sanitized, "added sanitized URL column");

    Ok(MungeSummary {
        removed_rows,
        rows: table.row_count(),
        ungrouped,
        own_hosted,
        sanitized,
    })
}

fn require_column(table: &TabularFile, column: &str) -> Result<()> {
    if table.header().contains(column) {
        Ok(())
    } else {
        Err(TableError::UnknownColumn {
            column: column.to_string(),
        }
        .into())
    }
}

fn remove_summary_rows(table: &mut TabularFile) -> Result<usize> {
    require_column(table, HOST)?;
    Ok(table.retain_rows(|row| matches!(row.get(HOST), Ok(Some(host)) if !host.is_empty())))
}

fn add_content_groups(table: &mut TabularFile) -> Result<usize> {
    table.add_column_after(CONTENT_TYPE, CONTENT_GROUP)?;
    let mut ungrouped = 0;
    for mut row in table.rows_mut() {
        let group = content_group(row.get(CONTENT_TYPE)?.unwrap_or_default());
        match group {
            Some(group) => row.set(CONTENT_GROUP, group)?,
            None => ungrouped += 1,
        }
    }
    Ok(ungrouped)
}

fn add_own_host_flags(table: &mut TabularFile, own_hosts: &[String]) -> Result<usize> {
    table.add_column_after(HOST, OWN_HOSTED)?;
    let mut own_hosted = 0;
    for mut row in table.rows_mut() {
        let owned = is_own_host(row.get(HOST)?.unwrap_or_default(), own_hosts);
        if owned {
            own_hosted += 1;
        }
        row.set(OWN_HOSTED, if owned { "1" } else { "0" })?;
    }
    Ok(own_hosted)
}

fn add_sanitized_urls(table: &mut TabularFile, rules: &SanitizeRules) -> Result<usize> {
    table.add_column_after(URL, SANITIZED_URL)?;
    let mut sanitized = 0;
    for mut row in table.rows_mut() {
        let Some(url) = row.get(URL)?.map(str::to_string) else {
            continue;
        };
        let result = if row.get(OWN_HOSTED)? == Some("1") {
            rules.apply(&url)
        } else {
            url.clone()
        };
        if result != url {
            sanitized += 1;
        }
        row.set(SANITIZED_URL, result)?;
    }
    Ok(sanitized)
}
