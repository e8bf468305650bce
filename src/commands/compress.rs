//! `guidance-compress compress`: the operator-driven multi-file run

use std::io::{self, Write};

use guidance_core::compressor::{CompressionRequest, CompressorService, Profile};
use guidance_core::error::{GuidanceError, Result};
use guidance_core::format::OutputFormat;
use guidance_core::pipeline::{Pipeline, Plan};
use guidance_core::report::{self, display_name};
use guidance_core::select::{select, GitCli, Selection};

use crate::cli::paths::resolve_from_cwd;
use crate::cli::CompressArgs;
use crate::commands::dispatch::{trace_command, CommandContext};
use crate::commands::interrupt;

/// Execute `guidance-compress compress`
pub fn execute(ctx: &CommandContext, args: &CompressArgs) -> Result<()> {
    let config = &ctx.config;
    let format = ctx.cli.format;
    let ratio = args.ratio.unwrap_or(config.compression.ratio);
    let request =
        CompressionRequest::new(ratio, Profile::Standard, config.compression.drop_consecutive)?;

    let mut service = CompressorService::from_config(&config.compressor);
    if !args.dry_run {
        service.probe()?;
        trace_command!(ctx.cli, ctx.start, "probe_compressor");
    }

    let selection = Selection {
        files: args.files.iter().map(|f| resolve_from_cwd(f)).collect(),
        large: args
            .large
            .then(|| args.min.unwrap_or(config.thresholds.large_min_lines)),
        unstaged: args.unstaged,
        directory: args.dir.clone(),
    };
    let discovery = select(&ctx.tree(), &selection, &GitCli);
    trace_command!(ctx.cli, ctx.start, "select_candidates");

    let mut stdout = io::stdout().lock();

    if discovery.is_empty() || args.dry_run {
        let mut plan = Plan::new(ratio, discovery.candidates, discovery.diagnostics);
        plan.dry_run = args.dry_run;
        report::write_plan(&mut stdout, &plan, format)?;
        return Ok(());
    }

    if format == OutputFormat::Human && !ctx.cli.quiet {
        let plan = Plan::new(ratio, discovery.candidates.clone(), Vec::new());
        report::write_plan(&mut stdout, &plan, format)?;
        writeln!(stdout)?;
        stdout.flush()?;
    }

    let interrupted = interrupt::install();
    let quiet = ctx.cli.quiet;

    let run = Pipeline::new(&mut service, request, config.thresholds.min_lines)
        .with_interrupt(&interrupted)
        .on_file(|index, total, path| {
            if !quiet {
                eprintln!("[{}/{}] Processing {}...", index + 1, total, display_name(path));
            }
        })
        .run(&discovery.candidates, discovery.diagnostics)?;
    trace_command!(ctx.cli, ctx.start, "compress_candidates");

    report::write_run(&mut stdout, &run, format)?;

    if run.interrupted() {
        return Err(GuidanceError::Interrupted {
            remaining: run.remaining,
        });
    }
    Ok(())
}
