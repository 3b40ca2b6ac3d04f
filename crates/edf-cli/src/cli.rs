//! CLI argument definitions for the EDF header validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "edf-validator",
    version,
    about = "EDF header compliance validator",
    long_about = "Validate the header fields of EDF recordings.\n\n\
                  Reads extracted header documents (JSON), checks every global and\n\
                  channel attribute, and appends a grouped incompliance report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v info, -vv debug, -vvv trace, -q errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

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
    /// Validate extracted EDF headers and write an incompliance report.
    Validate(ValidateArgs),

    /// Print the global and channel attribute schemas.
    Schema,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Header documents (one JSON object or an array of objects per file).
    #[arg(value_name = "HEADERS", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Report file; reports are appended when the file exists.
    #[arg(long = "report", value_name = "PATH", default_value = "edf-validation.log")]
    pub report: PathBuf,

    /// Report rendering.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ReportFormatArg,

    /// Print the report to stdout instead of appending it to the report file.
    #[arg(long = "stdout")]
    pub stdout: bool,

    /// Include raw header values in trace and debug logs.
    ///
    /// Header fields can carry patient identifiers; values are redacted
    /// unless this flag is set.
    #[arg(long = "log-data")]
    pub log_data: bool,

    /// Skip the per-file summary table.
    #[arg(long = "no-summary")]
    pub no_summary: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Text,
    Json,
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
