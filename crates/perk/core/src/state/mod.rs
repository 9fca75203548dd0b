//! Runtime combat state the perk engine reads and writes.
//!
//! [`UnitRuntime`] is owned by the battle room; the engine only mutates the
//! small [`PerkState`] scratch area on it.
mod common;
mod unit;

pub use common::{Position, SimTime, TeamId, UnitId};
pub use unit::{PerkState, UnitRuntime};
