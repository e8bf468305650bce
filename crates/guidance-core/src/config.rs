//! Configuration for guidance-compress
//!
//! Loaded from `config.toml`. Lookup order: an explicit `--config` path, then
//! `$GUIDANCE_COMPRESS_CONFIG_DIR/config.toml`, then the platform config
//! directory. A missing file means defaults.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::bail_invalid;
use crate::error::{GuidanceError, Result};
use crate::select::GuidanceTree;

pub use types::{
    CompressionDefaults, CompressorBackend, CompressorConfig, Config, Thresholds, DEFAULT_MODEL,
    DEFAULT_ROOT, DEFAULT_WORKER,
};

const CONFIG_DIR: &str = "guidance-compress";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "GUIDANCE_COMPRESS_CONFIG_DIR";

impl Config {
    /// Resolve the default config file location
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    GuidanceError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load configuration, falling back to defaults when no file exists.
    ///
    /// An explicitly requested file must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(GuidanceError::not_found("config file", path.display()));
                }
                path.to_path_buf()
            }
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        Self::load_from(&path)
    }

    /// Parse and validate a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GuidanceError::io_operation("read config", path.display(), e))?;

        let config: Config = toml::from_str(&content).map_err(|e| GuidanceError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config
            .validate()
            .map_err(|e| GuidanceError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        validate_ratio(self.compression.ratio)?;

        if self.thresholds.min_lines == 0 {
            bail_invalid!("thresholds.min_lines", 0);
        }
        if self.thresholds.large_min_lines == 0 {
            bail_invalid!("thresholds.large_min_lines", 0);
        }
        if self.thresholds.hook_trigger_lines == 0 {
            bail_invalid!("thresholds.hook_trigger_lines", 0);
        }
        if self.compressor.timeout_seconds == 0 {
            bail_invalid!("compressor.timeout_seconds", 0);
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            bail_invalid!("extension", format!("{:?}", self.extension));
        }

        match self.compressor.backend {
            CompressorBackend::Command if self.compressor.command.is_empty() => {
                bail_invalid!("compressor.command", "empty argv");
            }
            CompressorBackend::Http if self.compressor.endpoint.is_none() => {
                bail_invalid!("compressor.endpoint", "required for the http backend");
            }
            _ => {}
        }

        Ok(())
    }

    /// Guidance tree root, with an optional override from the command line
    pub fn guidance_root(&self, root_override: Option<&Path>) -> PathBuf {
        match root_override {
            Some(root) => root.to_path_buf(),
            None => expand_home(&self.root),
        }
    }

    /// The managed tree described by this configuration
    pub fn tree(&self, root_override: Option<&Path>) -> GuidanceTree {
        GuidanceTree {
            root: self.guidance_root(root_override),
            extension: self.extension.clone(),
            index_file: self.index_file.clone(),
            exempt: self.exempt.clone(),
        }
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| GuidanceError::Other(format!("failed to serialize config: {}", e)))
    }
}

/// Validate a target ratio: a fraction in (0, 1]
pub fn validate_ratio(ratio: f64) -> Result<()> {
    if !(ratio > 0.0 && ratio <= 1.0) {
        bail_invalid!("ratio (expected a fraction in (0, 1])", ratio);
    }
    Ok(())
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}
