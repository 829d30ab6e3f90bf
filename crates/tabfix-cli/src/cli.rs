//! Command-line arguments for `tabfix`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tabfix_model::ProcessingMode;

#[derive(Parser)]
#[command(
    name = "tabfix",
    version,
    about = "Clean device and alarm exports with broken headers and ambiguous dates",
    long_about = "Clean exported device and alarm-log tables (xlsx, csv, tsv).\n\n\
                  Device mode drops the decorative first row, deduplicates headers and \
                  reformats time columns. Alarm mode normalizes the alarm date column, \
                  optionally pulling dates into an expected month, and merges all files."
)]
pub struct Cli {
    /// Input files or directories (directories are scanned non-recursively).
    #[arg(value_name = "PATH", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Kind of export to process (default: device, or the config file's mode).
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Month the alarm dates should fall in, 1-12; 0 disables the correction.
    #[arg(
        long = "expected-month",
        value_name = "MONTH",
        value_parser = clap::value_parser!(u32).range(0..=12)
    )]
    pub expected_month: Option<u32>,

    /// Only process files with this name (repeatable).
    #[arg(long = "select", value_name = "FILE_NAME")]
    pub select: Vec<String>,

    /// Print date diagnostics for each alarm file.
    #[arg(long = "diagnostics")]
    pub diagnostics: bool,

    /// Write per-file reports and diagnostics as JSON.
    #[arg(long = "diagnostics-json", value_name = "PATH")]
    pub diagnostics_json: Option<PathBuf>,

    /// Directory for cleaned CSV files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Process and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the first ROWS rows of each cleaned table.
    #[arg(long = "preview", value_name = "ROWS", default_value_t = 0)]
    pub preview: usize,

    /// TOML file with column lists and defaults.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Device,
    Alarm,
}

impl From<ModeArg> for ProcessingMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Device => Self::Device,
            ModeArg::Alarm => Self::Alarm,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
