//! Argument structs for each subcommand

use clap::Args;
use std::path::PathBuf;

use super::parse::parse_ratio;

#[derive(Args, Debug, Clone)]
pub struct CompressArgs {
    /// Specific files to compress
    pub files: Vec<PathBuf>,

    /// Find large files under the guidance root
    #[arg(long)]
    pub large: bool,

    /// Minimum lines for --large (default from config, 200)
    #[arg(long, requires = "large")]
    pub min: Option<usize>,

    /// Compress every document in this directory (relative to the root)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Compress files with uncommitted changes
    #[arg(long)]
    pub unstaged: bool,

    /// Target compression ratio, a fraction in (0, 1] (default from config, 0.5)
    #[arg(long, value_parser = parse_ratio)]
    pub ratio: Option<f64>,

    /// Show what would be compressed without doing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct HookArgs {
    /// Edited file (used when the hook parameters carry no `file_path`)
    pub path: Option<PathBuf>,

    /// Hook parameters as JSON, e.g. `{"file_path": "..."}`
    #[arg(long, env = "CLAUDE_HOOK_PARAMS", hide_env_values = true)]
    pub params: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SingleArgs {
    /// File to compress (default: `oneshot_target` from config)
    pub path: Option<PathBuf>,

    /// Target compression ratio, a fraction in (0, 1]
    #[arg(long, value_parser = parse_ratio)]
    pub ratio: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Print only the config file location
    #[arg(long)]
    pub path: bool,
}
