//! Versioned output: backup and compressed siblings of an original document
//!
//! For `dir/name.ext` the outputs are `dir/name.original.ext` (verbatim
//! backup) and `dir/name.compressed.ext`. The original is never written.
//! Reruns overwrite both siblings; there are no numbered variants.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{GuidanceError, Result};

/// Stem suffix of the verbatim backup
pub const BACKUP_TAG: &str = "original";

/// Stem suffix of the compressed output
pub const COMPRESSED_TAG: &str = "compressed";

/// The two artifacts derived from an original path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiblingPaths {
    pub backup: PathBuf,
    pub compressed: PathBuf,
}

/// Derive backup and compressed paths for an original document.
pub fn sibling_paths(original: &Path) -> Result<SiblingPaths> {
    Ok(SiblingPaths {
        backup: tagged(original, BACKUP_TAG)?,
        compressed: tagged(original, COMPRESSED_TAG)?,
    })
}

fn tagged(original: &Path, tag: &str) -> Result<PathBuf> {
    let stem = original
        .file_stem()
        .ok_or_else(|| GuidanceError::invalid_value("document path", original.display()))?;

    let mut name = OsString::from(stem);
    name.push(".");
    name.push(tag);
    if let Some(ext) = original.extension() {
        name.push(".");
        name.push(ext);
    }

    Ok(original.with_file_name(name))
}

/// Whether a path is itself a backup or compressed sibling.
pub fn is_sibling_artifact(path: &Path) -> bool {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    [BACKUP_TAG, COMPRESSED_TAG]
        .iter()
        .any(|tag| stem.len() > tag.len() + 1 && stem.ends_with(&format!(".{}", tag)))
}

/// Persist the backup and compressed siblings of `original`.
///
/// The backup is written first, so a compressed sibling never exists without
/// its backup. `original` itself is only used to derive the sibling names.
#[tracing::instrument(skip(original_content, compressed_content), fields(path = %original.display()))]
pub fn write_siblings(
    original: &Path,
    original_content: &str,
    compressed_content: &str,
) -> Result<SiblingPaths> {
    let paths = sibling_paths(original)?;

    fs::write(&paths.backup, original_content)
        .map_err(|e| GuidanceError::io_operation("write backup", paths.backup.display(), e))?;
    fs::write(&paths.compressed, compressed_content).map_err(|e| {
        GuidanceError::io_operation("write compressed output", paths.compressed.display(), e)
    })?;

    tracing::debug!(
        backup = %paths.backup.display(),
        compressed = %paths.compressed.display(),
        "wrote siblings"
    );
    Ok(paths)
}
