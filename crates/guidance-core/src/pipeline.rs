//! The selection → transform → versioned-output loop
//!
//! Files are processed one at a time in candidate order. A failing file is
//! recorded and the loop moves on; an interrupt flag is checked between files.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::compressor::{CompressionError, CompressionRequest, Compressor};
use crate::document::{Document, TextStats};
use crate::orchestrator::{Orchestrator, Transform};
use crate::select::{Candidate, Diagnostic};
use crate::versioned::{write_siblings, SiblingPaths};

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Compressed {
        stats: TextStats,
        achieved_ratio: f64,
        origin_tokens: usize,
        compressed_tokens: usize,
        #[serde(flatten)]
        paths: SiblingPaths,
    },
    Skipped {
        lines: usize,
        min_lines: usize,
    },
    Failed {
        error: String,
    },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Compressed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileResult {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// A dry-run: the candidates that would be processed
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub started_at: DateTime<Utc>,
    /// False when the selection came up empty on a real run
    pub dry_run: bool,
    pub ratio: f64,
    pub candidates: Vec<Candidate>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Plan {
    pub fn new(ratio: f64, candidates: Vec<Candidate>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            started_at: Utc::now(),
            dry_run: false,
            ratio,
            candidates,
            diagnostics,
        }
    }
}

/// Results of a full run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub ratio: f64,
    pub results: Vec<FileResult>,
    pub diagnostics: Vec<Diagnostic>,
    /// Candidates left unprocessed because the run was interrupted
    pub remaining: usize,
}

impl RunReport {
    pub fn successes(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn skipped(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, FileOutcome::Skipped { .. }))
            .count()
    }

    pub fn failures(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, FileOutcome::Failed { .. }))
            .count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn interrupted(&self) -> bool {
        self.remaining > 0
    }
}

/// Runs candidates through the compressor and writes sibling outputs.
pub struct Pipeline<'a> {
    compressor: &'a mut dyn Compressor,
    request: CompressionRequest,
    min_lines: usize,
    interrupt: Option<&'a AtomicBool>,
    on_file: Option<Box<dyn FnMut(usize, usize, &Path) + 'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        compressor: &'a mut dyn Compressor,
        request: CompressionRequest,
        min_lines: usize,
    ) -> Self {
        Self {
            compressor,
            request,
            min_lines,
            interrupt: None,
            on_file: None,
        }
    }

    /// Stop between files once `flag` is set.
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Called with `(index, total, path)` before each file is processed.
    pub fn on_file(mut self, callback: impl FnMut(usize, usize, &Path) + 'a) -> Self {
        self.on_file = Some(Box::new(callback));
        self
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .map(|flag| flag.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    /// Process every candidate in order.
    ///
    /// Fails only when the compressor turns out to be unavailable before any
    /// file was compressed; no sibling has been written in that case.
    #[tracing::instrument(skip_all, fields(candidates = candidates.len(), ratio = self.request.target_ratio))]
    pub fn run(
        mut self,
        candidates: &[Candidate],
        diagnostics: Vec<Diagnostic>,
    ) -> Result<RunReport, CompressionError> {
        let started_at = Utc::now();
        let start = Instant::now();
        let total = candidates.len();
        let mut results = Vec::with_capacity(total);
        let mut remaining = 0;

        for (index, candidate) in candidates.iter().enumerate() {
            if self.interrupted() {
                remaining = total - index;
                tracing::warn!(remaining, "interrupted, stopping before next file");
                break;
            }

            if let Some(callback) = self.on_file.as_mut() {
                callback(index, total, candidate.path.as_path());
            }

            let outcome = match self.try_process(&candidate.path) {
                Ok(outcome) => outcome,
                Err(e) if !results.iter().any(|r: &FileResult| r.outcome.is_success()) => {
                    tracing::warn!(error = %e, "compressor unavailable, aborting run");
                    return Err(e);
                }
                Err(e) => FileOutcome::Failed {
                    error: e.to_string(),
                },
            };
            if let FileOutcome::Failed { error } = &outcome {
                tracing::warn!(path = %candidate.path.display(), %error, "file failed");
            }
            results.push(FileResult {
                path: candidate.path.clone(),
                outcome,
            });
        }

        crate::trace_time!(start, "pipeline_run", processed = results.len());

        Ok(RunReport {
            started_at,
            ratio: self.request.target_ratio,
            results,
            diagnostics,
            remaining,
        })
    }

    /// Load, transform and persist one file. Never returns an error: every
    /// failure becomes [`FileOutcome::Failed`].
    pub fn process(&mut self, path: &Path) -> FileOutcome {
        self.try_process(path)
            .unwrap_or_else(|e| FileOutcome::Failed {
                error: e.to_string(),
            })
    }

    /// Like [`Pipeline::process`], but an unavailable compressor is returned
    /// as an error instead of a per-file failure.
    fn try_process(&mut self, path: &Path) -> Result<FileOutcome, CompressionError> {
        let document = match Document::load(path) {
            Ok(document) => document,
            Err(e) => {
                return Ok(FileOutcome::Failed {
                    error: e.to_string(),
                })
            }
        };

        let mut orchestrator = Orchestrator::new(&mut *self.compressor, self.min_lines);
        let compressed = match orchestrator.transform(&document, &self.request) {
            Ok(Transform::Compressed(compressed)) => compressed,
            Ok(Transform::Skipped { lines, min_lines }) => {
                return Ok(FileOutcome::Skipped { lines, min_lines })
            }
            Err(e) if e.is_unavailable() => return Err(e),
            Err(e) => {
                return Ok(FileOutcome::Failed {
                    error: e.to_string(),
                })
            }
        };

        Ok(match write_siblings(&document.path, &document.content, &compressed.content) {
            Ok(paths) => FileOutcome::Compressed {
                stats: compressed.stats,
                achieved_ratio: compressed.achieved_ratio,
                origin_tokens: compressed.origin_tokens,
                compressed_tokens: compressed.compressed_tokens,
                paths,
            },
            Err(e) => FileOutcome::Failed {
                error: e.to_string(),
            },
        })
    }
}
