//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use lf_core::{LogLevel, Timeframe};

/// lookforge - generate LookML views from dbt artifacts
#[derive(Parser, Debug)]
#[command(name = "lf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to lookforge.yml (default: ./lookforge.yml when present)
    #[arg(short, long, global = true, env = "LOOKFORGE_CONFIG")]
    pub config: Option<String>,

    /// Log level, overrides the config file
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevelArg>,
}

/// Log levels accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate .view.lkml files for the selected models
    Generate(GenerateArgs),

    /// List the selected models
    Ls(LsArgs),
}

/// Input and selection flags shared by generate and ls
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Path to dbt's manifest.json
    #[arg(long)]
    pub manifest: Option<String>,

    /// Path to dbt's catalog.json
    #[arg(long)]
    pub catalog: Option<String>,

    /// Models to include (comma-separated)
    #[arg(short, long)]
    pub select: Option<String>,

    /// Models to exclude (comma-separated)
    #[arg(short, long)]
    pub exclude: Option<String>,

    /// Only models carrying this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Only models referenced by an exposure
    #[arg(long)]
    pub exposures_only: bool,

    /// Only exposures carrying this tag (implies --exposures-only)
    #[arg(long)]
    pub exposures_tag: Option<String>,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Directory for the generated files
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Name principal views after the physical table
    #[arg(long)]
    pub use_table_name: bool,

    /// Extra timeframes for every dimension group (comma-separated)
    #[arg(long, value_delimiter = ',', value_parser = parse_timeframe)]
    pub timeframes: Vec<Timeframe>,

    /// Add ISO year and ISO week dimensions to dimension groups
    #[arg(long)]
    pub include_iso_fields: bool,

    /// Prefix stripped from schema names in output paths
    #[arg(long)]
    pub remove_schema_prefix: Option<String>,

    /// Keep generating after a model fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// Fail a model when any generated field is invalid
    #[arg(long)]
    pub strict: bool,

    /// Deepest array path that still gets its own view
    #[arg(long)]
    pub max_nested_depth: Option<usize>,

    /// Number of worker threads
    #[arg(long)]
    pub threads: Option<usize>,

    /// Write the run summary as JSON to this path
    #[arg(long)]
    pub report: Option<String>,

    /// Suppress the progress bar and per-model output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: LsOutput,
}

/// List output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

fn parse_timeframe(value: &str) -> Result<Timeframe, String> {
    Timeframe::parse(value.trim()).ok_or_else(|| {
        let known: Vec<&str> = Timeframe::ALL.iter().map(|tf| tf.as_str()).collect();
        format!("unknown timeframe '{}' (expected one of: {})", value, known.join(", "))
    })
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
