//! `guidance-compress hook`: edit-triggered compression of one file
//!
//! The hook never blocks the edit that triggered it. Every early exit and
//! every failure ends with status 0; problems are reported as warnings.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use guidance_core::compressor::{CompressionRequest, CompressorService, Profile};
use guidance_core::document::count_file_lines;
use guidance_core::error::Result;
use guidance_core::pipeline::{FileResult, Pipeline};
use guidance_core::report;
use guidance_core::select::GuidanceTree;

use crate::cli::paths::resolve_from_cwd;
use crate::cli::HookArgs;
use crate::commands::dispatch::{trace_command, CommandContext};

/// Parameters passed by the editor integration
#[derive(Debug, Default, Deserialize)]
struct HookParams {
    #[serde(default)]
    file_path: Option<PathBuf>,
}

/// Execute `guidance-compress hook`
pub fn execute(ctx: &CommandContext, args: &HookArgs) -> Result<()> {
    if let Err(e) = run(ctx, args) {
        tracing::warn!(error = %e, "hook failed");
        if !ctx.cli.quiet {
            eprintln!("Warning: guidance compression skipped: {}", e);
        }
    }
    Ok(())
}

fn run(ctx: &CommandContext, args: &HookArgs) -> Result<()> {
    let Some(path) = hook_path(args) else {
        tracing::debug!("hook invoked without a file path");
        return Ok(());
    };
    let path = resolve_from_cwd(&path);
    let tree = ctx.tree();

    if let Some(reason) = ignore_reason(&tree, &path) {
        tracing::debug!(path = %path.display(), reason, "hook ignoring file");
        return Ok(());
    }

    let config = &ctx.config;
    let limit = config.thresholds.hook_trigger_lines;
    let lines = count_file_lines(&path)?;
    if lines <= limit {
        tracing::debug!(lines, limit, "under hook threshold");
        return Ok(());
    }

    let mut service = CompressorService::from_config(&config.compressor);
    if let Err(e) = service.probe() {
        if !ctx.cli.quiet {
            eprintln!(
                "Warning: {} has {} lines (limit: {}) but cannot be compressed: {}",
                path.display(),
                lines,
                limit,
                e
            );
        }
        return Ok(());
    }

    let request = CompressionRequest::new(
        config.compression.ratio,
        Profile::Standard,
        config.compression.drop_consecutive,
    )?;
    let outcome = Pipeline::new(&mut service, request, config.thresholds.min_lines).process(&path);
    trace_command!(ctx.cli, ctx.start, "hook_compress");

    let result = FileResult { path, outcome };
    report::write_hook(&mut io::stdout().lock(), &result, lines, limit, ctx.cli.format)?;
    Ok(())
}

/// The edited path: `file_path` from the hook parameters, else the
/// positional argument.
fn hook_path(args: &HookArgs) -> Option<PathBuf> {
    let from_params = args.params.as_deref().and_then(|raw| {
        serde_json::from_str::<HookParams>(raw)
            .map_err(|e| tracing::debug!(error = %e, "unparseable hook parameters"))
            .ok()
            .and_then(|params| params.file_path)
    });

    from_params.or_else(|| args.path.clone())
}

/// Why the hook leaves `path` alone, if it does.
fn ignore_reason(tree: &GuidanceTree, path: &Path) -> Option<&'static str> {
    if !path.is_file() {
        return Some("not a file");
    }
    if !tree.contains(path) {
        return Some("outside the guidance tree");
    }
    if !tree.is_managed(path) {
        return Some("not a managed document");
    }
    if tree.is_index(path) || tree.is_exempt(path) {
        return Some("denylisted");
    }
    None
}
