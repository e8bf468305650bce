//! Rendering of plans and run results
//!
//! Every renderer writes to a caller-supplied sink; nothing here prints
//! directly. Suggested follow-up commands are advisory text and are never
//! executed.

mod human;
mod json;
mod records;

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::format::{shell_quote, OutputFormat};
use crate::pipeline::{FileOutcome, FileResult, Plan, RunReport};

/// Shell commands offered after a successful compression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowUp {
    pub original: PathBuf,
    /// Compare backup and compressed output
    pub diff: String,
    /// Replace the original with the compressed output
    pub adopt: String,
    /// Restore the original from the backup
    pub revert: String,
}

impl FollowUp {
    pub fn for_result(result: &FileResult) -> Option<Self> {
        let FileOutcome::Compressed { paths, .. } = &result.outcome else {
            return None;
        };

        let original = quoted(&result.path);
        let backup = quoted(&paths.backup);
        let compressed = quoted(&paths.compressed);

        Some(Self {
            original: result.path.clone(),
            diff: format!("diff {} {}", backup, compressed),
            adopt: format!("mv {} {}", compressed, original),
            revert: format!("mv {} {}", backup, original),
        })
    }
}

/// Follow-ups for every successful file, in processing order
pub fn follow_ups(report: &RunReport) -> Vec<FollowUp> {
    report
        .results
        .iter()
        .filter_map(FollowUp::for_result)
        .collect()
}

fn quoted(path: &Path) -> String {
    shell_quote(&path.display().to_string())
}

/// Short display name for a path: its file name, or the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Render the candidate list of a dry run (or an empty selection).
pub fn write_plan(out: &mut dyn Write, plan: &Plan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => human::plan(out, plan)?,
        OutputFormat::Json => json::plan(out, plan)?,
        OutputFormat::Records => records::plan(out, plan)?,
    }
    Ok(())
}

/// Render the results of a multi-file run.
pub fn write_run(out: &mut dyn Write, report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => human::run(out, report)?,
        OutputFormat::Json => json::run(out, report)?,
        OutputFormat::Records => records::run(out, report)?,
    }
    Ok(())
}

/// Render a one-shot result with word and line statistics.
pub fn write_single(out: &mut dyn Write, result: &FileResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => human::single(out, result)?,
        OutputFormat::Json => json::file(out, "single", result)?,
        OutputFormat::Records => records::file(out, "single", result)?,
    }
    Ok(())
}

/// Render the outcome of an edit-triggered compression.
pub fn write_hook(
    out: &mut dyn Write,
    result: &FileResult,
    lines: usize,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => human::hook(out, result, lines, limit)?,
        OutputFormat::Json => json::file(out, "hook", result)?,
        OutputFormat::Records => records::file(out, "hook", result)?,
    }
    Ok(())
}
