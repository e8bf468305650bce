use std::io::{self, Write};

use super::{display_name, follow_ups, FollowUp};
use crate::pipeline::{FileOutcome, FileResult, Plan, RunReport};
use crate::select::Diagnostic;

pub(super) fn plan(out: &mut dyn Write, plan: &Plan) -> io::Result<()> {
    if plan.candidates.is_empty() {
        writeln!(out, "No files found matching criteria")?;
        return diagnostics(out, &plan.diagnostics);
    }

    writeln!(out, "Found {} file(s) to compress:", plan.candidates.len())?;
    for candidate in &plan.candidates {
        writeln!(
            out,
            "  {} ({} lines)",
            candidate.path.display(),
            candidate.lines
        )?;
    }
    diagnostics(out, &plan.diagnostics)?;

    if plan.dry_run {
        writeln!(out)?;
        writeln!(out, "Dry run: no files will be compressed")?;
    }
    Ok(())
}

pub(super) fn run(out: &mut dyn Write, report: &RunReport) -> io::Result<()> {
    writeln!(
        out,
        "Compressed {} file(s) with ratio {}",
        report.total(),
        report.ratio
    )?;

    for result in &report.results {
        writeln!(out)?;
        writeln!(out, "{}", result.path.display())?;
        outcome(out, &result.outcome)?;
    }

    writeln!(out)?;
    writeln!(out, "Summary:")?;
    writeln!(
        out,
        "  Successfully compressed: {}/{}",
        report.successes(),
        report.total()
    )?;
    if report.skipped() > 0 {
        writeln!(out, "  Skipped (below minimum size): {}", report.skipped())?;
    }
    if report.failures() > 0 {
        writeln!(out, "  Failed: {}", report.failures())?;
    }
    if report.interrupted() {
        writeln!(
            out,
            "  Interrupted: {} file(s) not processed",
            report.remaining
        )?;
    }
    diagnostics(out, &report.diagnostics)?;

    next_steps(out, &follow_ups(report))
}

fn outcome(out: &mut dyn Write, outcome: &FileOutcome) -> io::Result<()> {
    match outcome {
        FileOutcome::Compressed {
            stats,
            achieved_ratio,
            ..
        } => {
            writeln!(
                out,
                "  Compressed: {} -> {} lines",
                stats.original_lines, stats.compressed_lines
            )?;
            writeln!(
                out,
                "  Reduction: {:.1}% ({:.1}x)",
                stats.line_reduction_pct(),
                achieved_ratio
            )
        }
        FileOutcome::Skipped { lines, min_lines } => writeln!(
            out,
            "  Skipped: {} lines is below the {}-line minimum",
            lines, min_lines
        ),
        FileOutcome::Failed { error } => writeln!(out, "  Failed: {}", error),
    }
}

fn next_steps(out: &mut dyn Write, follow_ups: &[FollowUp]) -> io::Result<()> {
    if follow_ups.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "Next steps:")?;
    writeln!(out, "  Review compressed versions:")?;
    for follow_up in follow_ups {
        writeln!(out, "    {}", follow_up.diff)?;
    }
    writeln!(out)?;
    writeln!(out, "  If satisfied, replace originals:")?;
    for follow_up in follow_ups {
        writeln!(out, "    {}", follow_up.adopt)?;
    }
    writeln!(out)?;
    writeln!(out, "  To revert:")?;
    for follow_up in follow_ups {
        writeln!(out, "    {}", follow_up.revert)?;
    }
    Ok(())
}

fn diagnostics(out: &mut dyn Write, diagnostics: &[Diagnostic]) -> io::Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Ignored during selection:")?;
    for diagnostic in diagnostics {
        writeln!(out, "  {}", diagnostic)?;
    }
    Ok(())
}

pub(super) fn single(out: &mut dyn Write, result: &FileResult) -> io::Result<()> {
    writeln!(out, "Compressing: {}", result.path.display())?;

    match &result.outcome {
        FileOutcome::Compressed {
            stats,
            achieved_ratio,
            paths,
            ..
        } => {
            writeln!(out, "Backup created: {}", paths.backup.display())?;
            writeln!(out)?;
            writeln!(out, "=== COMPRESSION STATISTICS ===")?;
            writeln!(out, "Original words: {}", stats.original_words)?;
            writeln!(out, "Compressed words: {}", stats.compressed_words)?;
            writeln!(out, "Word reduction: {:.1}%", stats.word_reduction_pct())?;
            writeln!(out, "Original lines: {}", stats.original_lines)?;
            writeln!(out, "Compressed lines: {}", stats.compressed_lines)?;
            writeln!(out, "Line reduction: {:.1}%", stats.line_reduction_pct())?;
            writeln!(out, "Compression ratio: {:.3}", achieved_ratio)?;
            writeln!(out)?;
            writeln!(out, "Compressed file created: {}", paths.compressed.display())?;
            if let Some(follow_up) = FollowUp::for_result(result) {
                writeln!(out)?;
                writeln!(out, "Review: {}", follow_up.diff)?;
                writeln!(out, "Adopt:  {}", follow_up.adopt)?;
            }
            Ok(())
        }
        other => outcome(out, other),
    }
}

pub(super) fn hook(
    out: &mut dyn Write,
    result: &FileResult,
    lines: usize,
    limit: usize,
) -> io::Result<()> {
    writeln!(out, "{} has {} lines (limit: {})", display_name(&result.path), lines, limit)?;

    match &result.outcome {
        FileOutcome::Compressed {
            achieved_ratio,
            origin_tokens,
            compressed_tokens,
            paths,
            ..
        } => {
            writeln!(
                out,
                "Compressed: {} -> {} tokens ({:.1}x reduction)",
                origin_tokens, compressed_tokens, achieved_ratio
            )?;
            writeln!(out, "Saved:")?;
            writeln!(out, "  Original: {}", paths.backup.display())?;
            writeln!(out, "  Compressed: {}", paths.compressed.display())?;
            if let Some(follow_up) = FollowUp::for_result(result) {
                writeln!(out, "Review the compressed version and replace if satisfactory:")?;
                writeln!(out, "  {}", follow_up.adopt)?;
            }
            Ok(())
        }
        other => outcome(out, other),
    }
}
