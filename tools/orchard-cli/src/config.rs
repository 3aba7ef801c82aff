//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use orchard_commerce::combo::DiscountTiers;
use orchard_commerce::search::SortKey;
use orchard_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["orchard.toml", ".orchard.toml", "orchard.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrchardConfig {
    /// Catalog snapshot location.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Filter defaults.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Combo discount table.
    #[serde(default)]
    pub combo: ComboConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl OrchardConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse config text, TOML unless `json` is set.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Catalog snapshot configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a saved `/Products` response, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Filter defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Sort used when `--sort` is not given.
    #[serde(default)]
    pub default_sort: SortKey,
}

/// Combo configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboConfig {
    /// Discount tiers; validated when the file is read.
    #[serde(default)]
    pub tiers: DiscountTiers,
}

/// Generate a default orchard.toml config file.
pub fn generate_default_config(catalog_path: &str) -> String {
    format!(
        r#"# Orchard catalog tool configuration

[catalog]
# Saved response of the /Products listing endpoint
path = "{catalog_path}"

[filter]
# popular | newest | price-asc | price-desc | rating | best-selling
default_sort = "popular"

[combo]
tiers = [
    {{ min_quantity = 10, percentage = 15 }},
    {{ min_quantity = 7, percentage = 10 }},
    {{ min_quantity = 5, percentage = 6 }},
]

[logging]
# trace | debug | info | warn | error (RUST_LOG overrides)
level = "info"
# human | json
format = "human"
"#
    )
}
