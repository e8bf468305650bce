//! `guidance-compress config`: show the effective configuration

use guidance_core::config::Config;
use guidance_core::error::Result;
use guidance_core::format::OutputFormat;

use crate::cli::ConfigArgs;
use crate::commands::dispatch::CommandContext;

/// Execute `guidance-compress config`
pub fn execute(ctx: &CommandContext, args: &ConfigArgs) -> Result<()> {
    let path = match &ctx.cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let root = ctx.tree().root;

    if args.path {
        println!("{}", path.display());
        return Ok(());
    }

    match ctx.cli.format {
        OutputFormat::Human => {
            println!("# config file: {}", path.display());
            if !path.exists() {
                println!("# (not present, showing defaults)");
            }
            println!("# guidance root: {}", root.display());
            println!();
            print!("{}", ctx.config.to_toml()?);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": path,
                "exists": path.exists(),
                "guidance_root": root,
                "config": ctx.config,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Records => {
            println!(
                "H guidance=1 records=1 mode=config path=\"{}\" exists={} root=\"{}\"",
                path.display(),
                path.exists(),
                root.display()
            );
            for line in ctx.config.to_toml()?.lines() {
                if !line.trim().is_empty() {
                    println!("D {}", line);
                }
            }
        }
    }

    Ok(())
}
