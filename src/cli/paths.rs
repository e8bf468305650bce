//! Path resolution utilities for CLI commands

use std::env;
use std::path::{Path, PathBuf};

/// Resolve a user-supplied path against the current directory.
///
/// Absolute paths are returned unchanged. If the current directory cannot be
/// determined, relative paths are returned as given.
pub fn resolve_from_cwd(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
