//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
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

    ctx.output.header("Current Configuration");

    let catalog = &ctx.config.catalog;
    ctx.output.info("[catalog]");
    ctx.output.kv("currency", catalog.currency.code());
    if let Some(ref store) = catalog.store_id {
        ctx.output.kv("store_id", store);
    }

    let rec = &ctx.config.recommendations;
    ctx.output.info("[recommendations]");
    ctx.output.kv("default_limit", &rec.default_limit.to_string());
    ctx.output
        .kv("max_history_categories", &rec.max_history_categories.to_string());
    ctx.output
        .kv("exclude_out_of_stock", &rec.exclude_out_of_stock.to_string());
    ctx.output.kv("messages.popular", &rec.messages.popular);
    ctx.output.kv("messages.new_arrivals", &rec.messages.new_arrivals);
    ctx.output
        .kv("messages.browsing_history", &rec.messages.browsing_history);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("lapak.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
