//! TOML job configuration for the aggregate commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::warn;

use wpt_model::DEFAULT_DELIMITER;
use wpt_transform::{
    CombineOptions, DEFAULT_OWN_HOSTS, MungeOptions, ProvenanceColumns, SanitizeRules,
};

pub const DEFAULT_TARGET_SUFFIX: &str = "-alt";

/// One combine job: every file in `data_dir` matching `sources` goes into
/// `output_dir/target`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CombineJob {
    pub sources: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub name: String,
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MungeSection {
    pub own_hosts: Vec<String>,
    /// Inserted between the combined file's stem and extension.
    pub target_suffix: String,
    /// Replaces the built-in rules when present.
    pub rules: Option<Vec<RuleConfig>>,
}

impl Default for MungeSection {
    fn default() -> Self {
        Self {
            own_hosts: DEFAULT_OWN_HOSTS.iter().map(|h| (*h).to_string()).collect(),
            target_suffix: DEFAULT_TARGET_SUFFIX.to_string(),
            rules: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvenanceSection {
    pub row_combined: String,
    pub file_name: String,
    pub file_number: String,
    pub row_original: String,
}

impl Default for ProvenanceSection {
    fn default() -> Self {
        let defaults = ProvenanceColumns::default();
        Self {
            row_combined: defaults.row_combined,
            file_name: defaults.file_name,
            file_number: defaults.file_number,
            row_original: defaults.row_original,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AggregateConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub delimiter: char,
    pub combine: Vec<CombineJob>,
    pub munge: MungeSection,
    pub provenance: ProvenanceSection,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("."),
            delimiter: DEFAULT_DELIMITER,
            combine: Vec::new(),
            munge: MungeSection::default(),
            provenance: ProvenanceSection::default(),
        }
    }
}

impl AggregateConfig {
    /// Read `path` and resolve relative directories against its parent.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut config = Self::parse(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_relative_to(base);
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if config.munge.target_suffix.is_empty() {
            bail!("munge.target_suffix must not be empty");
        }
        Ok(config)
    }

    pub fn resolve_relative_to(&mut self, base: &Path) {
        if self.data_dir.is_relative() {
            self.data_dir = base.join(&self.data_dir);
        }
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
    }

    pub fn combine_options(&self) -> CombineOptions {
        let provenance = &self.provenance;
        CombineOptions {
            delimiter: self.delimiter,
            provenance: ProvenanceColumns {
                row_combined: provenance.row_combined.clone(),
                file_name: provenance.file_name.clone(),
                file_number: provenance.file_number.clone(),
                row_original: provenance.row_original.clone(),
            },
        }
    }

    pub fn munge_options(&self) -> Result<MungeOptions> {
        let rules = match &self.munge.rules {
            Some(rules) => {
                let specs: Vec<(&str, &str, &str)> = rules
                    .iter()
                    .map(|rule| {
                        (
                            rule.name.as_str(),
                            rule.pattern.as_str(),
                            rule.replacement.as_str(),
                        )
                    })
                    .collect();
                SanitizeRules::from_specs(&specs).context("compile sanitize rules")?
            }
            None => SanitizeRules::default(),
        };
        if rules.is_empty() {
            warn!("munge.rules is empty; own-hosted URLs are copied unsanitized");
        }
        Ok(MungeOptions {
            delimiter: self.delimiter,
            own_hosts: self.munge.own_hosts.clone(),
            rules,
        })
    }

    pub fn combine_target(&self, job: &CombineJob) -> PathBuf {
        self.output_dir.join(&job.target)
    }

    /// Munged sibling of a combined file: `<stem><suffix>.<ext>`.
    pub fn munge_target(&self, combined: &Path) -> PathBuf {
        munge_target(combined, &self.munge.target_suffix)
    }
}

/// `requests-combined.txt` with suffix `-alt` becomes `requests-combined-alt.txt`.
pub fn munge_target(combined: &Path, suffix: &str) -> PathBuf {
    let stem = combined
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}{suffix}");
    if let Some(ext) = combined.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    combined.with_file_name(name)
}
