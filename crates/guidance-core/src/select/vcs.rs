//! Version-control query for modified-but-uncommitted documents

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Failures of the version-control query. Callers degrade these to an empty
/// result; they are never fatal.
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("git is not available: {0}")]
    NotInstalled(String),

    #[error("git exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },

    #[error("git produced non-UTF-8 output: {0}")]
    InvalidOutput(String),
}

/// Lists files with uncommitted modifications.
pub trait VersionControl {
    /// Paths relative to `root` of modified files with the given extension.
    fn list_modified(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>, VcsError>;
}

/// `git diff --name-only` run as a subprocess
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl VersionControl for GitCli {
    fn list_modified(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>, VcsError> {
        let pathspec = format!("*.{}", extension);
        let output = Command::new("git")
            .arg("-C")
            .arg(root)
            .args(["diff", "--name-only", "--relative", "--"])
            .arg(&pathspec)
            .output()
            .map_err(|e| VcsError::NotInstalled(e.to_string()))?;

        if !output.status.success() {
            return Err(VcsError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|e| VcsError::InvalidOutput(e.to_string()))?;

        let suffix = format!(".{}", extension);
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| line.ends_with(&suffix))
            .map(PathBuf::from)
            .collect())
    }
}
