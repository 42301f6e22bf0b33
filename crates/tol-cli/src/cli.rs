//! CLI argument definitions for territory lookup.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "territory-lookup",
    version,
    about = "Territory owner lookup - find the SDR assigned to a territory",
    long_about = "Look up the SDR assigned to a territory from a spreadsheet or CSV export.\n\n\
                  The file needs a column whose header contains \"Sales Level 6\" and one\n\
                  whose header contains \"SDR\". Header matching ignores case and extra text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow owner names and other cell values to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Output format for results (overrides the settings file).
    #[arg(long = "format", value_enum, global = true)]
    pub format: Option<OutputFormatArg>,

    /// Reject files larger than this many bytes (overrides the settings file).
    #[arg(long = "max-file-size", value_name = "BYTES", global = true)]
    pub max_file_size: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a file and print the owners of territories matching a query.
    Lookup(LookupArgs),

    /// Load a file and report what was recognised in it.
    Inspect(InspectArgs),

    /// Load a file and answer queries typed on stdin, one per line.
    Repl(ReplArgs),
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Spreadsheet or delimited text file (.csv, .tsv, .txt, .xlsx, .xls, .ods).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Case-insensitive substring of the territory key.
    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Spreadsheet or delimited text file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser)]
pub struct ReplArgs {
    /// File to load before reading queries (use `:load` later otherwise).
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// CLI output format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
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
