//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default guidance tree, relative to the home directory
pub const DEFAULT_ROOT: &str = "~/.claude/guidance";

/// Default worker program for the command backend
pub const DEFAULT_WORKER: &str = "llmlingua-worker";

/// Default model requested from the compressor
pub const DEFAULT_MODEL: &str = "microsoft/llmlingua-2-bert-base-multilingual-cased-meetingbank";

/// Top-level configuration (`config.toml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Guidance tree root (`~/` is expanded)
    #[serde(default = "default_root")]
    pub root: String,

    /// Managed document extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Index file excluded from every scan
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Files exempt from compression policy (never auto-compressed)
    #[serde(default = "default_exempt")]
    pub exempt: Vec<String>,

    /// Default target for the one-shot command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oneshot_target: Option<PathBuf>,

    /// Line-count thresholds
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Compression request defaults
    #[serde(default)]
    pub compression: CompressionDefaults,

    /// Compressor backend selection
    #[serde(default)]
    pub compressor: CompressorConfig,
}

/// Line-count thresholds. Each entry point keeps its own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Documents below this are skipped instead of compressed (default 150)
    #[serde(default = "default_min_lines")]
    pub min_lines: usize,

    /// Minimum lines for the size scan (default 200)
    #[serde(default = "default_large_min_lines")]
    pub large_min_lines: usize,

    /// The hook acts only on documents longer than this (default 200)
    #[serde(default = "default_hook_trigger_lines")]
    pub hook_trigger_lines: usize,
}

/// Defaults for each compression request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressionDefaults {
    /// Target fraction of the original size, in (0, 1]
    #[serde(default = "default_ratio")]
    pub ratio: f64,

    /// Collapse runs of preserved tokens
    #[serde(default = "default_drop_consecutive")]
    pub drop_consecutive: bool,
}

/// Which compressor backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressorBackend {
    /// Long-running local worker process speaking JSON lines
    #[default]
    Command,
    /// Remote HTTP service
    Http,
}

impl std::fmt::Display for CompressorBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompressorBackend::Command => write!(f, "command"),
            CompressorBackend::Http => write!(f, "http"),
        }
    }
}

/// Compressor backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressorConfig {
    #[serde(default)]
    pub backend: CompressorBackend,

    /// Worker argv for the command backend
    #[serde(default = "default_command")]
    pub command: Vec<String>,

    /// Service URL for the http backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Model name forwarded to the compressor
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_root() -> String {
    DEFAULT_ROOT.to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_index_file() -> String {
    "README.md".to_string()
}

fn default_exempt() -> Vec<String> {
    vec!["ultra-concise-enforcement.md".to_string()]
}

fn default_min_lines() -> usize {
    150
}

fn default_large_min_lines() -> usize {
    200
}

fn default_hook_trigger_lines() -> usize {
    200
}

fn default_ratio() -> f64 {
    0.5
}

fn default_drop_consecutive() -> bool {
    true
}

fn default_command() -> Vec<String> {
    vec![DEFAULT_WORKER.to_string()]
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            min_lines: default_min_lines(),
            large_min_lines: default_large_min_lines(),
            hook_trigger_lines: default_hook_trigger_lines(),
        }
    }
}

impl Default for CompressionDefaults {
    fn default() -> Self {
        CompressionDefaults {
            ratio: default_ratio(),
            drop_consecutive: default_drop_consecutive(),
        }
    }
}

impl Default for CompressorConfig {
    fn default() -> Self {
        CompressorConfig {
            backend: CompressorBackend::default(),
            command: default_command(),
            endpoint: None,
            timeout_seconds: default_timeout_seconds(),
            model: default_model(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: default_root(),
            extension: default_extension(),
            index_file: default_index_file(),
            exempt: default_exempt(),
            thresholds: Thresholds::default(),
            compression: CompressionDefaults::default(),
            compressor: CompressorConfig::default(),
            oneshot_target: None,
        }
    }
}
