//! Data-driven perk content and loaders.
//!
//! This crate houses the authored perk catalog and loaders for TOML data files:
//! - Perk catalog: unit display name → perk id → [`perk_core::Perk`]
//! - Balance parameters: [`perk_core::BalanceConfig`]
//!
//! A catalog is built once at process start and is read-only afterwards.
//! The built-in catalog is embedded at compile time; servers with their own
//! data directory go through [`ContentFactory`].

pub mod catalog;
pub mod loaders;

pub use catalog::{PerkCatalog, load_unit_perk};
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, PerkCatalogLoader};
