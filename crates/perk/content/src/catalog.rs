//! Static perk catalog keyed by (unit display name, perk id).
//!
//! Lookups never fail loudly: an unknown unit or perk id yields `None`,
//! which callers treat as "no perk equipped".

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use perk_core::{Perk, PerkError};

use crate::loaders::PerkCatalogLoader;

/// Registry of authored perks.
///
/// Perks are stored behind `Arc` so every unit equipping the same perk
/// shares one definition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerkCatalog {
    units: BTreeMap<String, BTreeMap<String, Arc<Perk>>>,
}

impl PerkCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide catalog compiled into the crate, parsed on first use.
    ///
    /// The embedded data is covered by tests; should it ever fail to load,
    /// the error is logged and the catalog is empty, so every lookup reports
    /// "no perk" instead of taking the server down.
    pub fn builtin() -> &'static PerkCatalog {
        static BUILTIN: OnceLock<PerkCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            PerkCatalogLoader::builtin().unwrap_or_else(|e| {
                tracing::error!(target: "perk::catalog", error = %e, "built-in perk catalog failed to load");
                PerkCatalog::new()
            })
        })
    }

    /// Validates `perk` and registers it under `unit_name`.
    pub fn insert(&mut self, unit_name: impl Into<String>, perk: Perk) -> Result<(), PerkError> {
        perk.validate()?;

        let unit_name = unit_name.into();
        let perks = self.units.entry(unit_name.clone()).or_default();
        if perks.contains_key(&perk.id) {
            return Err(PerkError::DuplicatePerk {
                unit: unit_name,
                perk: perk.id,
            });
        }
        perks.insert(perk.id.clone(), Arc::new(perk));
        Ok(())
    }

    /// Looks up the perk `perk_id` available to `unit_name`.
    pub fn load_unit_perk(&self, unit_name: &str, perk_id: &str) -> Option<Arc<Perk>> {
        self.units.get(unit_name)?.get(perk_id).cloned()
    }

    /// Perks available to `unit_name`, ordered by perk id.
    pub fn perks_for(&self, unit_name: &str) -> impl Iterator<Item = &Arc<Perk>> + '_ {
        self.units
            .get(unit_name)
            .into_iter()
            .flat_map(|perks| perks.values())
    }

    pub fn unit_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.units.keys().map(String::as_str)
    }

    /// Every (unit name, perk) pair, ordered by unit name then perk id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Perk>)> + '_ {
        self.units
            .iter()
            .flat_map(|(unit, perks)| perks.values().map(move |perk| (unit.as_str(), perk)))
    }

    /// Number of (unit, perk) pairs.
    pub fn len(&self) -> usize {
        self.units.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Looks up a perk in the built-in catalog.
pub fn load_unit_perk(unit_name: &str, perk_id: &str) -> Option<Arc<Perk>> {
    PerkCatalog::builtin().load_unit_perk(unit_name, perk_id)
}

#[cfg(test)]
mod tests {
    use perk_core::PerkEffect;

    use super::*;

    fn cleave() -> Perk {
        Perk::new(
            "cleave",
            "Cleave",
            PerkEffect::NthAttackBonus {
                nth: 4,
                bonus_dmg_pct: 0.4,
            },
        )
    }

    #[test]
    fn lookup_round_trips_every_builtin_pair() {
        let catalog = PerkCatalog::builtin();
        assert!(!catalog.is_empty());

        for (unit, perk) in catalog.iter() {
            let loaded = load_unit_perk(unit, &perk.id).expect("known pair must resolve");
            assert_eq!(*loaded, **perk);
            assert_eq!(load_unit_perk(unit, &perk.id), Some(loaded));
        }
    }

    #[test]
    fn unknown_pairs_are_absent() {
        assert!(load_unit_perk("Cryomancer", "cleave").is_none());
        assert!(load_unit_perk("Dragon", "frost_aura").is_none());
        for _ in 0..3 {
            assert!(load_unit_perk("", "").is_none());
        }
    }

    #[test]
    fn same_perk_id_differs_per_unit() {
        let captain = load_unit_perk("Vanguard Captain", "shield_wall").unwrap();
        let bearer = load_unit_perk("Shieldbearer", "shield_wall").unwrap();
        assert_ne!(captain.effects, bearer.effects);
    }

    #[test]
    fn insert_rejects_duplicates_and_invalid_rows() {
        let mut catalog = PerkCatalog::new();
        catalog.insert("Berserker", cleave()).unwrap();

        assert_eq!(
            catalog.insert("Berserker", cleave()),
            Err(PerkError::DuplicatePerk {
                unit: "Berserker".into(),
                perk: "cleave".into(),
            })
        );

        let broken = Perk::new(
            "frost_aura",
            "Frost Aura",
            PerkEffect::AuraSlow {
                radius: -5.0,
                slow_pct: 0.2,
            },
        );
        assert!(catalog.insert("Cryomancer", broken).is_err());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn equipping_shares_one_definition() {
        let mut catalog = PerkCatalog::new();
        catalog.insert("Berserker", cleave()).unwrap();

        let a = catalog.load_unit_perk("Berserker", "cleave").unwrap();
        let b = catalog.load_unit_perk("Berserker", "cleave").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(catalog.perks_for("Berserker").count(), 1);
        assert_eq!(catalog.perks_for("Nobody").count(), 0);
    }
}
