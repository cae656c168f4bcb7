use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Combine,
    Munge,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combine => f.write_str("combine"),
            Self::Munge => f.write_str("munge"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub kind: JobKind,
    pub target: PathBuf,
    /// Input files: matched sources for combine, one for munge.
    pub sources: usize,
    pub rows: Option<usize>,
    /// Summary rows dropped by munge.
    pub removed_rows: Option<usize>,
    pub own_hosted: Option<usize>,
    pub sanitized: Option<usize>,
    pub error: Option<String>,
}

impl JobSummary {
    pub fn new(kind: JobKind, target: PathBuf) -> Self {
        Self {
            kind,
            target,
            sources: 0,
            rows: None,
            removed_rows: None,
            own_hosted: None,
            sanitized: None,
            error: None,
        }
    }

    pub fn failed(mut self, error: impl fmt::Display) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub jobs: Vec<JobSummary>,
}

impl RunReport {
    pub fn push(&mut self, job: JobSummary) {
        self.jobs.push(job);
    }

    pub fn extend(&mut self, other: RunReport) {
        self.jobs.extend(other.jobs);
    }

    pub fn has_errors(&self) -> bool {
        self.jobs.iter().any(|job| !job.succeeded())
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobSummary> {
        self.jobs.iter().filter(|job| !job.succeeded())
    }

    /// Job count, failed count and written rows for one stage, or `None` if
    /// the stage did not run.
    pub fn stage_totals(&self, kind: JobKind) -> Option<StageTotals> {
        let mut totals = StageTotals::default();
        for job in self.jobs.iter().filter(|job| job.kind == kind) {
            totals.jobs += 1;
            totals.rows += job.rows.unwrap_or_default();
            if !job.succeeded() {
                totals.failed += 1;
            }
        }
        (totals.jobs > 0).then_some(totals)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageTotals {
    pub jobs: usize,
    pub failed: usize,
    pub rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(kind: JobKind, rows: Option<usize>) -> JobSummary {
        JobSummary {
            rows,
            ..JobSummary::new(kind, PathBuf::from("out.txt"))
        }
    }

    #[test]
    fn test_stage_totals_per_kind() {
        let report = RunReport {
            jobs: vec![
                job(JobKind::Combine, Some(4)),
                job(JobKind::Combine, None).failed("no files"),
                job(JobKind::Combine, Some(3)),
            ],
        };
        assert_eq!(
            report.stage_totals(JobKind::Combine),
            Some(StageTotals {
                jobs: 3,
                failed: 1,
                rows: 7
            })
        );
        assert_eq!(report.stage_totals(JobKind::Munge), None);
    }
}
