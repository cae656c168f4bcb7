//! CLI argument definitions for the result aggregator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "wpt-aggregate",
    version,
    about = "Combine and munge web-performance request results",
    long_about = "Combine dated web-performance result files into one file per test view,\n\
                  then derive report columns (content group, own-host flag, sanitized URL)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run every combine job in the config.
    Combine(ConfigArgs),

    /// Munge every combined file in the config into its suffixed sibling.
    Munge(ConfigArgs),

    /// Combine, then munge the combined files.
    Aggregate(ConfigArgs),

    /// Munge one file with the built-in options.
    MungeFile(MungeFileArgs),
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Path to the TOML job configuration.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

#[derive(Parser)]
pub struct MungeFileArgs {
    /// Combined requests file to read.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// File to write; overwritten if it exists.
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
