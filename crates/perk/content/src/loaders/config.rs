//! Balance configuration loader.

use std::path::Path;

use perk_core::BalanceConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for balance parameters from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a `BalanceConfig` from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> LoadResult<BalanceConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))
    }

    pub fn from_toml_str(content: &str) -> LoadResult<BalanceConfig> {
        let config: BalanceConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse balance TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}
