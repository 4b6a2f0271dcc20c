//! Configuration commands.

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let content = toml::to_string_pretty(&ctx.config).context("Failed to render config")?;
    ctx.output.header("Configuration");
    println!("{}", content);
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(Path::new("medihub.toml"));
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    ctx.output.success(&format!("Created {}", path.display()));
    Ok(())
}
