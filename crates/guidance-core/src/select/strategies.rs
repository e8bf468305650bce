//! The four discovery strategies

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::vcs::VersionControl;
use super::{canonical_or_self, Candidate, Diagnostic, Discovery, GuidanceTree};
use crate::document::count_file_lines;

/// Explicitly named paths. Missing paths are recorded, not fatal.
pub fn explicit(paths: &[PathBuf]) -> Discovery {
    let mut found = Discovery::default();

    for path in paths {
        if !path.exists() {
            found.diagnostics.push(Diagnostic::MissingPath { path: path.clone() });
            continue;
        }
        measure_into(&canonical_or_self(path), &mut found);
    }

    found
}

/// Managed documents under the root with at least `min_lines` lines.
///
/// The index file and policy-exempt files are never returned.
pub fn by_size(tree: &GuidanceTree, min_lines: usize) -> Discovery {
    let mut found = scan(tree, &tree.root, |path| {
        !tree.is_index(path) && !tree.is_exempt(path)
    });
    found.candidates.retain(|c| c.lines >= min_lines);
    found
}

/// Managed documents with uncommitted modifications.
///
/// A failing version-control query yields an empty result.
pub fn unstaged(tree: &GuidanceTree, vcs: &dyn VersionControl) -> Discovery {
    let mut found = Discovery::default();

    let listed = match vcs.list_modified(&tree.root, &tree.extension) {
        Ok(listed) => listed,
        Err(e) => {
            found.diagnostics.push(Diagnostic::VcsUnavailable {
                reason: e.to_string(),
            });
            return found;
        }
    };

    for relative in listed {
        let path = tree.root.join(&relative);
        if !path.exists() || !tree.is_managed(&path) {
            continue;
        }
        measure_into(&canonical_or_self(&path), &mut found);
    }

    found
}

/// Every managed document under `root/directory`, regardless of size.
///
/// Excludes the index file; policy-exempt files are excluded as well.
pub fn by_directory(tree: &GuidanceTree, directory: &Path) -> Discovery {
    let dir = tree.root.join(directory);
    if !dir.is_dir() {
        tracing::warn!(directory = %directory.display(), "directory not found");
        return Discovery {
            candidates: Vec::new(),
            diagnostics: vec![Diagnostic::DirectoryNotFound { path: dir }],
        };
    }

    scan(tree, &dir, |path| !tree.is_index(path) && !tree.is_exempt(path))
}

/// Walk `dir` recursively, measuring managed documents accepted by `keep`.
fn scan(tree: &GuidanceTree, dir: &Path, keep: impl Fn(&Path) -> bool) -> Discovery {
    let mut found = Discovery::default();

    if !dir.is_dir() {
        found.diagnostics.push(Diagnostic::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
        return found;
    }

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                found.diagnostics.push(Diagnostic::Unreadable {
                    path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !tree.is_managed(path) || !keep(path) {
            continue;
        }
        measure_into(&canonical_or_self(path), &mut found);
    }

    found
}

fn measure_into(path: &Path, found: &mut Discovery) {
    match count_file_lines(path) {
        Ok(lines) => found.candidates.push(Candidate {
            path: path.to_path_buf(),
            lines,
        }),
        Err(e) => found.diagnostics.push(Diagnostic::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}
