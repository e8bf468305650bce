//! Command trait and context for dispatching commands

use std::time::Instant;

use crate::cli::Cli;
use guidance_core::config::Config;
use guidance_core::error::Result;
use guidance_core::select::GuidanceTree;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: Config,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: Config, start: Instant) -> Self {
        Self { cli, config, start }
    }

    /// The managed tree, honouring `--root`
    pub fn tree(&self) -> GuidanceTree {
        self.config.tree(self.cli.root.as_deref())
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        println!("guidance-compress {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Keeps guidance documents under a size budget with reversible compression.");
        println!("Guidance root: {}", ctx.tree().root.display());
        println!();
        println!("Run `guidance-compress --help` for usage information.");
        Ok(())
    }
}
