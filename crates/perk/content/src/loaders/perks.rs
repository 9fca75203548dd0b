//! Perk catalog loader.

use std::path::Path;

use perk_core::Perk;
use serde::{Deserialize, Serialize};

use crate::catalog::PerkCatalog;
use crate::loaders::{LoadResult, read_file};

/// Perk catalog structure for TOML files.
///
/// ```toml
/// [[units]]
/// name = "Cryomancer"
///
/// [[units.perks]]
/// id = "frost_aura"
/// name = "Frost Aura"
/// effects = { type = "aura_slow", radius = 50.0, slow_pct = 0.20 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub units: Vec<UnitPerks>,
}

/// The perks one unit can equip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitPerks {
    pub name: String,
    #[serde(default)]
    pub perks: Vec<Perk>,
}

/// Loader for the perk catalog from TOML files.
pub struct PerkCatalogLoader;

impl PerkCatalogLoader {
    /// Load and validate a perk catalog from a TOML file.
    pub fn load(path: &Path) -> LoadResult<PerkCatalog> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))
    }

    /// Parse and validate a perk catalog from TOML text.
    ///
    /// Every row is validated; the first invalid or duplicate row fails the load.
    pub fn from_toml_str(content: &str) -> LoadResult<PerkCatalog> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse perk catalog TOML: {}", e))?;

        let mut catalog = PerkCatalog::new();
        for unit in file.units {
            for perk in unit.perks {
                catalog
                    .insert(unit.name.clone(), perk)
                    .map_err(|e| anyhow::anyhow!("Unit '{}': {}", unit.name, e))?;
            }
        }

        tracing::debug!(
            target: "perk::catalog",
            units = catalog.unit_names().count(),
            perks = catalog.len(),
            "perk catalog loaded"
        );
        Ok(catalog)
    }

    /// The catalog compiled into this crate.
    pub fn builtin() -> LoadResult<PerkCatalog> {
        Self::from_toml_str(include_str!("../../data/perks.toml"))
    }
}
