use std::io::Write;

use serde_json::json;

use super::{follow_ups, FollowUp};
use crate::error::Result;
use crate::pipeline::{FileOutcome, FileResult, Plan, RunReport};

pub(super) fn plan(out: &mut dyn Write, plan: &Plan) -> Result<()> {
    let output = json!({
        "mode": "plan",
        "started_at": plan.started_at.to_rfc3339(),
        "dry_run": plan.dry_run,
        "ratio": plan.ratio,
        "count": plan.candidates.len(),
        "candidates": plan.candidates,
        "diagnostics": plan.diagnostics,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

pub(super) fn run(out: &mut dyn Write, report: &RunReport) -> Result<()> {
    let results: Vec<serde_json::Value> = report.results.iter().map(result_value).collect();

    let output = json!({
        "mode": "run",
        "started_at": report.started_at.to_rfc3339(),
        "ratio": report.ratio,
        "summary": {
            "total": report.total(),
            "compressed": report.successes(),
            "skipped": report.skipped(),
            "failed": report.failures(),
            "remaining": report.remaining,
            "interrupted": report.interrupted(),
        },
        "results": results,
        "next_steps": follow_ups(report),
        "diagnostics": report.diagnostics,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

pub(super) fn file(out: &mut dyn Write, mode: &str, result: &FileResult) -> Result<()> {
    let mut output = result_value(result);
    if let Some(map) = output.as_object_mut() {
        map.insert("mode".to_string(), json!(mode));
        if let Some(follow_up) = FollowUp::for_result(result) {
            map.insert("next_steps".to_string(), json!(follow_up));
        }
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

/// A file result with reduction percentages precomputed
fn result_value(result: &FileResult) -> serde_json::Value {
    let mut value = serde_json::to_value(result).unwrap_or_else(|_| json!({}));

    if let (FileOutcome::Compressed { stats, .. }, Some(map)) =
        (&result.outcome, value.as_object_mut())
    {
        map.insert(
            "line_reduction_pct".to_string(),
            json!(format!("{:.1}", stats.line_reduction_pct())),
        );
        map.insert(
            "word_reduction_pct".to_string(),
            json!(format!("{:.1}", stats.word_reduction_pct())),
        );
    }
    value
}
