//! Job runners behind the CLI subcommands.
//!
//! Each job runs on its own: a failure is recorded in the report and the
//! remaining jobs still run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use tracing::{error, info, info_span};

use wpt_ingest::expand_pattern;
use wpt_transform::{CombineOptions, MungeOptions, combine, munge};

use crate::config::{AggregateConfig, CombineJob};
use crate::types::{JobKind, JobSummary, RunReport};

/// Run every `[[combine]]` job.
pub fn run_combine(config: &AggregateConfig) -> RunReport {
    let span = info_span!("combine_jobs", jobs = config.combine.len());
    let _guard = span.enter();
    let start = Instant::now();

    let options = config.combine_options();
    let mut report = RunReport::default();
    for job in &config.combine {
        report.push(combine_job(config, job, &options));
    }

    info!(
        jobs = report.jobs.len(),
        failed = report.failures().count(),
        duration_ms = start.elapsed().as_millis(),
        "combine jobs finished"
    );
    report
}

fn combine_job(
    config: &AggregateConfig,
    job: &CombineJob,
    options: &CombineOptions,
) -> JobSummary {
    let target = config.combine_target(job);
    let summary = JobSummary::new(JobKind::Combine, target.clone());

    let sources = match expand_pattern(&config.data_dir, &job.sources) {
        Ok(sources) => sources,
        Err(err) => {
            error!(output = %target.display(), %err, "combine job failed");
            return summary.failed(err);
        }
    };
    let summary = JobSummary {
        sources: sources.len(),
        ..summary
    };
    match combine(&sources, &target, options) {
        Ok(result) => JobSummary {
            rows: Some(result.rows),
            ..summary
        },
        Err(err) => {
            error!(output = %target.display(), %err, "combine job failed");
            summary.failed(err)
        }
    }
}

/// Munge every combine target into its suffixed sibling.
///
/// # Errors
///
/// Fails before running any job if the configured sanitize rules do not
/// compile.
pub fn run_munge(config: &AggregateConfig) -> Result<RunReport> {
    let options = config.munge_options()?;
    let targets: Vec<PathBuf> = config
        .combine
        .iter()
        .map(|job| config.combine_target(job))
        .collect();
    Ok(munge_targets(config, &targets, &options))
}

/// Combine, then munge every target whose combine succeeded.
///
/// # Errors
///
/// Fails before any combine job runs if the configured sanitize rules do not
/// compile.
pub fn run_aggregate(config: &AggregateConfig) -> Result<RunReport> {
    let options = config.munge_options()?;
    let mut report = run_combine(config);
    let combined: Vec<PathBuf> = report
        .jobs
        .iter()
        .filter(|job| job.succeeded())
        .map(|job| job.target.clone())
        .collect();
    report.extend(munge_targets(config, &combined, &options));
    Ok(report)
}

fn munge_targets(config: &AggregateConfig, combined: &[PathBuf], options: &MungeOptions) -> RunReport {
    let span = info_span!("munge_jobs", jobs = combined.len());
    let _guard = span.enter();

    let mut report = RunReport::default();
    for source in combined {
        let target = config.munge_target(source);
        report.push(munge_job(source, &target, options));
    }
    info!(
        jobs = report.jobs.len(),
        failed = report.failures().count(),
        "munge jobs finished"
    );
    report
}

/// Munge a single file with the built-in options.
pub fn run_munge_file(source: &Path, target: &Path) -> RunReport {
    let mut report = RunReport::default();
    report.push(munge_job(source, target, &MungeOptions::default()));
    report
}

fn munge_job(source: &Path, target: &Path, options: &MungeOptions) -> JobSummary {
    let summary = JobSummary {
        sources: 1,
        ..JobSummary::new(JobKind::Munge, target.to_path_buf())
    };
    match munge(source, target, options) {
        Ok(result) => JobSummary {
            rows: Some(result.rows),
            removed_rows: Some(result.removed_rows),
            own_hosted: Some(result.own_hosted),
            sanitized: Some(result.sanitized),
            ..summary
        },
        Err(err) => {
            error!(source = %source.display(), %err, "munge job failed");
            summary.failed(err)
        }
    }
}
