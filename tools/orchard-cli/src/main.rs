//! Orchard CLI - Inspect catalog snapshots and price combos from the terminal.
//!
//! Commands:
//! - `orchard facets` - List the filter dimensions of a catalog
//! - `orchard filter` - Filter and sort products
//! - `orchard combo price` - Price a combo selection
//! - `orchard combo payload` - Print a combo-creation request body
//! - `orchard config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ComboArgs, ConfigArgs, FilterArgs};

/// Orchard CLI - Catalog filtering and combo pricing for the storefront
#[derive(Parser)]
#[command(name = "orchard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog snapshot path (overrides [catalog].path)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List categories, package types, tags and price/weight ranges
    Facets,

    /// Filter and sort products
    Filter(FilterArgs),

    /// Build and price combos
    Combo(ComboArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let loaded = context::Context::load(
        cli.config.as_deref(),
        cli.catalog.as_deref(),
        output.clone(),
    );
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let mut logging = ctx.config.logging.clone();
    if cli.verbose {
        logging = logging.verbose();
    }
    if let Err(e) = orchard_observability::init_logging(&logging) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }
    tracing::debug!(config = ?ctx.config_path, "configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Facets => commands::facets::run(&ctx).await,
        Commands::Filter(args) => commands::filter::run(args, &ctx).await,
        Commands::Combo(args) => commands::combo::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
