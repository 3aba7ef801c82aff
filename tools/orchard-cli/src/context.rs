//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use orchard_commerce::catalog::Catalog;

use crate::config::{OrchardConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: OrchardConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// `--catalog` override.
    catalog_override: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&Path>,
        catalog_override: Option<&Path>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (OrchardConfig::load(path)?, Some(path.to_path_buf())),
            None => match find_config_file(&cwd) {
                Some(path) => (OrchardConfig::load(&path)?, Some(path)),
                None => (OrchardConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            catalog_override: catalog_override.map(Path::to_path_buf),
        })
    }

    /// Catalog snapshot to read: `--catalog`, then `[catalog].path`
    /// relative to the config file's directory.
    pub fn catalog_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.catalog_override {
            return Ok(self.resolve_path(path));
        }

        let Some(path) = self.config.catalog.path.as_deref() else {
            bail!("No catalog snapshot configured. Pass --catalog or set [catalog].path.");
        };

        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .map(|dir| self.resolve_path(dir))
            .unwrap_or_else(|| self.cwd.clone());
        Ok(base.join(path))
    }

    /// Read and parse the catalog snapshot.
    pub async fn load_catalog(&self) -> Result<Catalog> {
        let path = self.catalog_path()?;
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read catalog snapshot: {}", path.display()))?;
        let catalog = Catalog::from_json_str(&content)
            .with_context(|| format!("Failed to parse catalog snapshot: {}", path.display()))?;

        self.output.debug(&format!(
            "Loaded {} products from {}",
            catalog.len(),
            path.display()
        ));
        Ok(catalog)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in the directory tree above `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
