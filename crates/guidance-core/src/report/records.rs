use std::io::{self, Write};

use super::{follow_ups, FollowUp};
use crate::format::escape_quotes;
use crate::pipeline::{FileOutcome, FileResult, Plan, RunReport};
use crate::select::Diagnostic;

pub(super) fn plan(out: &mut dyn Write, plan: &Plan) -> io::Result<()> {
    writeln!(
        out,
        "H guidance=1 records=1 mode=compress.plan count={} ratio={} dry_run={}",
        plan.candidates.len(),
        plan.ratio,
        plan.dry_run
    )?;
    for candidate in &plan.candidates {
        writeln!(
            out,
            "F path=\"{}\" lines={}",
            escape_quotes(&candidate.path.display().to_string()),
            candidate.lines
        )?;
    }
    diagnostics(out, &plan.diagnostics)
}

pub(super) fn run(out: &mut dyn Write, report: &RunReport) -> io::Result<()> {
    writeln!(
        out,
        "H guidance=1 records=1 mode=compress.run total={} compressed={} skipped={} failed={} remaining={} ratio={}",
        report.total(),
        report.successes(),
        report.skipped(),
        report.failures(),
        report.remaining,
        report.ratio
    )?;
    for result in &report.results {
        outcome(out, result)?;
    }
    for follow_up in follow_ups(report) {
        next_steps(out, &follow_up)?;
    }
    diagnostics(out, &report.diagnostics)
}

pub(super) fn file(out: &mut dyn Write, mode: &str, result: &FileResult) -> io::Result<()> {
    writeln!(out, "H guidance=1 records=1 mode={}", mode)?;
    outcome(out, result)?;
    if let Some(follow_up) = FollowUp::for_result(result) {
        next_steps(out, &follow_up)?;
    }
    Ok(())
}

fn outcome(out: &mut dyn Write, result: &FileResult) -> io::Result<()> {
    let path = escape_quotes(&result.path.display().to_string());
    match &result.outcome {
        FileOutcome::Compressed {
            stats,
            achieved_ratio,
            paths,
            ..
        } => writeln!(
            out,
            "R compressed path=\"{}\" lines={}->{} words={}->{} reduction={:.1}% ratio={:.1}x backup=\"{}\" output=\"{}\"",
            path,
            stats.original_lines,
            stats.compressed_lines,
            stats.original_words,
            stats.compressed_words,
            stats.line_reduction_pct(),
            achieved_ratio,
            escape_quotes(&paths.backup.display().to_string()),
            escape_quotes(&paths.compressed.display().to_string())
        ),
        FileOutcome::Skipped { lines, min_lines } => writeln!(
            out,
            "R skipped path=\"{}\" lines={} min_lines={}",
            path, lines, min_lines
        ),
        FileOutcome::Failed { error } => writeln!(
            out,
            "R failed path=\"{}\" error=\"{}\"",
            path,
            escape_quotes(error)
        ),
    }
}

fn next_steps(out: &mut dyn Write, follow_up: &FollowUp) -> io::Result<()> {
    writeln!(out, "A diff {}", follow_up.diff)?;
    writeln!(out, "A adopt {}", follow_up.adopt)?;
    writeln!(out, "A revert {}", follow_up.revert)
}

fn diagnostics(out: &mut dyn Write, diagnostics: &[Diagnostic]) -> io::Result<()> {
    for diagnostic in diagnostics {
        writeln!(out, "W \"{}\"", escape_quotes(&diagnostic.to_string()))?;
    }
    Ok(())
}
