//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init {
            force,
            catalog_path,
        } => init_config(force, &catalog_path, ctx),
        ConfigCommand::Validate => validate_config(ctx).await,
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
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(unset)"),
    );

    ctx.output.info("[filter]");
    ctx.output
        .kv("default_sort", ctx.config.filter.default_sort.as_str());

    ctx.output.info("[combo]");
    for tier in ctx.config.combo.tiers.tiers() {
        ctx.output.list_item(&format!(
            "{}+ items: {}% off",
            tier.min_quantity, tier.percentage
        ));
    }

    ctx.output.info("[logging]");
    ctx.output
        .kv("level", ctx.config.logging.level.as_directive());
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(force: bool, catalog_path: &str, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(catalog_path))?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    if !ctx.cwd.join(catalog_path).exists() {
        ctx.output.warn(&format!(
            "Catalog snapshot {} does not exist yet",
            catalog_path
        ));
    }

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    // Tier tables are checked while the file is parsed.
    if ctx.config.combo.tiers.tiers().is_empty() {
        warnings.push("combo.tiers is empty; combos never earn a discount".to_string());
    }

    if let Err(e) = ctx.config.logging.env_filter() {
        errors.push(format!("logging: {e}"));
    }

    match ctx.load_catalog().await {
        Ok(catalog) => {
            let variantless = catalog
                .products()
                .iter()
                .filter(|p| p.variant.is_empty())
                .count();
            if catalog.is_empty() {
                warnings.push("catalog snapshot has no products".to_string());
            } else if variantless > 0 {
                warnings.push(format!(
                    "{variantless} of {} products have no variants and never match a filter",
                    catalog.len()
                ));
            }
        }
        Err(e) => errors.push(format!("catalog: {e:#}")),
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
