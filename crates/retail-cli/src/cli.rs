//! CLI argument definitions for the retail ETL.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use retail_model::Entity;

#[derive(Parser)]
#[command(
    name = "retail-etl",
    version,
    about = "Retail sales ETL - clean heterogeneous sources into a star-schema warehouse",
    long_about = "Extract users, cards, stores, products, orders and dates from their sources,\n\
                  clean each dataset and load it into a SQLite warehouse with primary\n\
                  and foreign keys."
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

    /// Allow row values in logs and rejection samples.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract, clean and load the configured sources.
    Run(RunArgs),

    /// Clean a single CSV or JSON file.
    Clean(CleanArgs),

    /// Print the warehouse schema.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Configuration file (default: retail-etl.toml).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Restrict the run to these entities (repeatable).
    #[arg(long = "entity", value_name = "NAME")]
    pub entities: Vec<Entity>,

    /// Extract and clean without writing to the warehouse.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Entity the file holds.
    #[arg(long = "entity", value_name = "NAME")]
    pub entity: Entity,

    /// CSV or JSON file: local path, http(s) URL or s3://bucket/key.
    #[arg(long = "input", value_name = "FILE")]
    pub input: String,

    /// Write the cleaned rows to this CSV file.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Only show this entity.
    #[arg(long = "entity", value_name = "NAME")]
    pub entity: Option<Entity>,

    /// Print CREATE TABLE statements instead of the column table.
    #[arg(long = "ddl")]
    pub ddl: bool,
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
