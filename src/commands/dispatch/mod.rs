//! Command dispatch logic for guidance-compress

use std::time::Instant;

use crate::cli::{Cli, Commands};
use guidance_core::config::Config;
use guidance_core::error::Result;
use tracing::debug;

mod command;
mod macros;

pub(crate) use command::CommandContext;
use command::{Command, NoCommand};
pub(crate) use macros::trace_command;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        // The hook must never block the edit that triggered it.
        Err(e) if matches!(cli.command, Some(Commands::Hook(_))) => {
            tracing::warn!(error = %e, "hook skipped: configuration unusable");
            if !cli.quiet {
                eprintln!("Warning: guidance compression skipped: {}", e);
            }
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    debug!(elapsed = ?start.elapsed(), "load_config");

    let ctx = CommandContext::new(cli, config, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Compress(args) => crate::commands::compress::execute(ctx, args),
            Commands::Hook(args) => crate::commands::hook::execute(ctx, args),
            Commands::Single(args) => crate::commands::single::execute(ctx, args),
            Commands::Config(args) => crate::commands::config::execute(ctx, args),
        }
    }
}
