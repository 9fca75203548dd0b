//! Content factory for loading perk content from a data directory.

use std::path::{Path, PathBuf};

use perk_core::BalanceConfig;

use crate::catalog::PerkCatalog;
use crate::loaders::{ConfigLoader, LoadResult, PerkCatalogLoader};

/// Content factory that loads all perk content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── balance.toml
/// └── perks.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load balance parameters from `balance.toml`, or defaults if the file is absent.
    pub fn load_balance(&self) -> LoadResult<BalanceConfig> {
        let path = self.data_dir.join("balance.toml");
        if !path.exists() {
            tracing::warn!(target: "perk::catalog", path = %path.display(), "no balance.toml, using defaults");
            return Ok(BalanceConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the perk catalog from `perks.toml`.
    pub fn load_perks(&self) -> LoadResult<PerkCatalog> {
        let path = self.data_dir.join("perks.toml");
        PerkCatalogLoader::load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_both_files_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("balance.toml"),
            "aura_tick_interval_ms = 250\ncontinuous_effect_grace_ms = 300\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("perks.toml"),
            include_str!("../../data/perks.toml"),
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        let balance = factory.load_balance().unwrap();
        assert_eq!(balance.aura_tick_interval_ms, 250);
        assert_eq!(balance.continuous_effect_grace_ms, 300);
        assert_eq!(
            factory.load_perks().unwrap(),
            PerkCatalogLoader::builtin().unwrap()
        );
    }

    #[test]
    fn missing_balance_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_balance().unwrap(), BalanceConfig::default());
        assert!(factory.load_perks().is_err());
    }
}
