//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;
use crate::output::status_badge;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { output, force } => init_config(&output, force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);

    ctx.output.info("");
    ctx.output.info("[notifications]");
    ctx.output.kv("webhook_url", &ctx.config.notifications.webhook_url);

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv(
        "dir",
        ctx.config.storage.dir.as_deref().unwrap_or("(default)"),
    );

    ctx.output.info("");
    ctx.output.info("[admin]");
    ctx.output.kv("username", &ctx.config.admin.username);
    let hash_state = if ctx.config.admin.password_hash.is_some() {
        "set"
    } else {
        "not set"
    };
    ctx.output.kv("password_hash", &status_badge(hash_state));

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_str());
    ctx.output.kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(output: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(output);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if output.ends_with(".json") {
        CliConfig::default().save(&config_path.to_string_lossy())?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
