//! CLI argument parsing for guidance-compress
//!
//! Global flags: --root, --config, --format, --quiet, --verbose, --log-level,
//! --log-json

pub mod args;
pub mod parse;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use guidance_core::format::OutputFormat;

pub use args::{CompressArgs, ConfigArgs, HookArgs, SingleArgs};
use parse::parse_format;

/// Compress oversized guidance documents into reviewable sibling files
#[derive(Parser, Debug)]
#[command(name = "guidance-compress")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Guidance tree root (overrides `root` in the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: human, json or records
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress progress and warnings
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug logging and phase timings on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or full filter directive (e.g. `debug`, `guidance_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select guidance files and write compressed siblings
    Compress(CompressArgs),

    /// Compress one edited file if it crossed the size threshold (never fails)
    Hook(HookArgs),

    /// Compress one file with the rich profile and print statistics
    Single(SingleArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}
