//! CLI command implementations.

pub mod combo;
pub mod config;
pub mod facets;
pub mod filter;

use clap::{Args, Subcommand};
use orchard_commerce::catalog::Nutrient;
use orchard_commerce::ids::VariantId;
use orchard_commerce::search::SortKey;
use rust_decimal::Decimal;

/// Arguments for the filter command.
#[derive(Args)]
pub struct FilterArgs {
    /// Category name to match (repeatable, any matches).
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Tag to match (repeatable, any matches).
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Package type to match (repeatable, any matches).
    #[arg(long = "package-type", value_name = "PACKAGE")]
    pub package_types: Vec<String>,

    /// Lowest variant list price.
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Highest variant list price.
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// Lowest net weight in grams.
    #[arg(long)]
    pub min_weight: Option<f64>,

    /// Highest net weight in grams.
    #[arg(long)]
    pub max_weight: Option<f64>,

    /// Only products with a variant on promotion.
    #[arg(long)]
    pub promotion: bool,

    /// Only products with a variant in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Accent-insensitive text search over names and package types.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Nutrient range, e.g. `protein=0:5` (repeatable).
    #[arg(
        long = "nutrient",
        value_name = "NAME=LO:HI",
        value_parser = filter::parse_nutrient_range
    )]
    pub nutrients: Vec<(Nutrient, f64, f64)>,

    /// Result order (default from config).
    #[arg(long, value_parser = filter::parse_sort)]
    pub sort: Option<SortKey>,

    /// Show only the first N results.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the combo command.
#[derive(Args)]
pub struct ComboArgs {
    #[command(subcommand)]
    pub command: ComboCommand,
}

#[derive(Subcommand)]
pub enum ComboCommand {
    /// Price a combo selection.
    Price {
        /// Variant to add, optionally with a quantity: `v-123` or `v-123x4`.
        #[arg(
            short,
            long = "item",
            value_name = "VARIANT[xQTY]",
            required = true,
            value_parser = combo::parse_item
        )]
        items: Vec<ItemSpec>,
    },
    /// Print the combo-creation request body.
    Payload {
        /// Combo name.
        #[arg(short, long)]
        name: String,

        /// Combo description.
        #[arg(short, long)]
        description: Option<String>,

        /// Variant to add, optionally with a quantity: `v-123` or `v-123x4`.
        #[arg(
            short,
            long = "item",
            value_name = "VARIANT[xQTY]",
            required = true,
            value_parser = combo::parse_item
        )]
        items: Vec<ItemSpec>,
    },
}

/// One `--item` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub variant_id: VariantId,
    pub quantity: u32,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Catalog snapshot path to write into the file.
        #[arg(long, default_value = "products.json")]
        catalog_path: String,
    },
    /// Validate the config file and the catalog it points at.
    Validate,
}
