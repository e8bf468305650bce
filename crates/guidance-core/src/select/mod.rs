//! Candidate discovery
//!
//! Four independent strategies produce `(path, lines)` candidates; their
//! outputs are merged into one deduplicated list sorted by size. Strategies
//! never fail: anything that goes wrong is recorded as a [`Diagnostic`].

mod merge;
pub mod strategies;
pub mod vcs;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::versioned::is_sibling_artifact;

pub use merge::merge;
pub use strategies::{by_directory, by_size, explicit, unstaged};
pub use vcs::{GitCli, VcsError, VersionControl};

/// The managed guidance tree and its exclusion rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidanceTree {
    pub root: PathBuf,
    /// Managed extension, without the dot
    pub extension: String,
    /// Index file name, excluded from every scan
    pub index_file: String,
    /// File names exempt from compression policy
    pub exempt: Vec<String>,
}

impl GuidanceTree {
    /// Has the managed extension and is not a backup or compressed sibling.
    pub fn is_managed(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
            && !is_sibling_artifact(path)
    }

    pub fn is_index(&self, path: &Path) -> bool {
        file_name_is(path, &self.index_file)
    }

    pub fn is_exempt(&self, path: &Path) -> bool {
        self.exempt.iter().any(|name| file_name_is(path, name))
    }

    /// Whether `path` lies inside the tree. Both sides are canonicalized
    /// when possible so symlinked roots compare equal.
    pub fn contains(&self, path: &Path) -> bool {
        let root = canonical_or_self(&self.root);
        let path = canonical_or_self(path);
        path.starts_with(&root)
    }
}

fn file_name_is(path: &Path, name: &str) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(name)
}

pub(crate) fn canonical_or_self(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// One document selected for processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub path: PathBuf,
    pub lines: usize,
}

/// Something a strategy skipped instead of failing on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An explicit path that does not exist
    MissingPath { path: PathBuf },
    /// A file or directory entry that could not be read
    Unreadable { path: PathBuf, reason: String },
    /// A requested scan directory that does not exist
    DirectoryNotFound { path: PathBuf },
    /// The version-control query failed; no unstaged files were listed
    VcsUnavailable { reason: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::MissingPath { path } => write!(f, "not found: {}", path.display()),
            Diagnostic::Unreadable { path, reason } => {
                write!(f, "unreadable: {} ({})", path.display(), reason)
            }
            Diagnostic::DirectoryNotFound { path } => {
                write!(f, "directory not found: {}", path.display())
            }
            Diagnostic::VcsUnavailable { reason } => {
                write!(f, "version control unavailable: {}", reason)
            }
        }
    }
}

/// Strategy output: candidates plus what was skipped along the way
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub candidates: Vec<Candidate>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Discovery {
    pub fn extend(&mut self, other: Discovery) {
        self.candidates.extend(other.candidates);
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Which strategies an invocation asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Explicitly named files
    pub files: Vec<PathBuf>,
    /// Size scan with this minimum line count
    pub large: Option<usize>,
    /// Modified-but-uncommitted files
    pub unstaged: bool,
    /// Every document under this subdirectory of the root
    pub directory: Option<PathBuf>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.large.is_none() && !self.unstaged && self.directory.is_none()
    }
}

/// Run every requested strategy and merge the results.
#[tracing::instrument(skip_all, fields(root = %tree.root.display()))]
pub fn select(tree: &GuidanceTree, selection: &Selection, vcs: &dyn VersionControl) -> Discovery {
    let mut found = Discovery::default();

    if !selection.files.is_empty() {
        found.extend(explicit(&selection.files));
    }
    if let Some(min_lines) = selection.large {
        found.extend(by_size(tree, min_lines));
    }
    if selection.unstaged {
        found.extend(unstaged(tree, vcs));
    }
    if let Some(directory) = &selection.directory {
        found.extend(by_directory(tree, directory));
    }

    for diagnostic in &found.diagnostics {
        tracing::debug!(%diagnostic, "skipped during discovery");
    }

    Discovery {
        candidates: merge(found.candidates),
        diagnostics: found.diagnostics,
    }
}
