//! `guidance-compress single`: one file, rich profile, full statistics

use std::io;

use guidance_core::compressor::{CompressionRequest, CompressorService, Profile};
use guidance_core::config::expand_home;
use guidance_core::error::{GuidanceError, Result};
use guidance_core::pipeline::{FileOutcome, FileResult, Pipeline};
use guidance_core::report;
use guidance_core::bail_usage;

use crate::cli::paths::resolve_from_cwd;
use crate::cli::SingleArgs;
use crate::commands::dispatch::{trace_command, CommandContext};

/// Execute `guidance-compress single`
pub fn execute(ctx: &CommandContext, args: &SingleArgs) -> Result<()> {
    let config = &ctx.config;

    let path = match (&args.path, &config.oneshot_target) {
        (Some(path), _) => resolve_from_cwd(path),
        (None, Some(target)) => expand_home(&target.to_string_lossy()),
        (None, None) => {
            bail_usage!("no file given and no `oneshot_target` in the config file")
        }
    };
    if !path.is_file() {
        return Err(GuidanceError::not_found("file", path.display()));
    }

    let ratio = args.ratio.unwrap_or(config.compression.ratio);
    let request =
        CompressionRequest::new(ratio, Profile::Rich, config.compression.drop_consecutive)?;

    let mut service = CompressorService::from_config(&config.compressor);
    service.probe()?;

    // No size guard: naming the file is the request.
    let outcome = Pipeline::new(&mut service, request, 0).process(&path);
    trace_command!(ctx.cli, ctx.start, "single_compress");

    let failure = match &outcome {
        FileOutcome::Failed { error } => Some(error.clone()),
        _ => None,
    };

    let result = FileResult {
        path: path.clone(),
        outcome,
    };
    report::write_single(&mut io::stdout().lock(), &result, ctx.cli.format)?;

    match failure {
        Some(reason) => Err(GuidanceError::FailedOperationWithTarget {
            operation: "compress".to_string(),
            target: path.display().to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
