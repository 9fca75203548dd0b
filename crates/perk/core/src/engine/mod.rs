//! The four combat entry points driven by the battle simulation.
//!
//! - [`tick_perk_auras`] once per aura interval
//! - [`on_attack_damage_multiplier`] once per attack, before damage
//! - [`on_damage_taken_multiplier`] once per incoming hit, before HP is reduced
//! - [`on_unit_death`] once per death transition
//!
//! None of them fail. A unit without a perk, or with a perk whose type the
//! entry point does not handle, yields a neutral multiplier and no commands.
mod attack;
mod aura;
mod death;

pub use attack::{on_attack_damage_multiplier, on_damage_taken_multiplier};
pub use aura::{AuraClock, plan_perk_auras, tick_perk_auras};
pub use death::{on_unit_death, plan_unit_death};

use crate::state::UnitRuntime;
use crate::world::WorldQuery;

/// Multiplier returned whenever a perk does not apply.
pub const NEUTRAL_MULTIPLIER: f32 = 1.0;

/// Candidates within `radius` of `origin`, excluding `origin`, ordered by id.
fn within_radius<'w, W: WorldQuery + ?Sized>(
    world: &W,
    origin: &UnitRuntime,
    candidates: Vec<&'w UnitRuntime>,
    radius: f32,
) -> Vec<&'w UnitRuntime> {
    let mut in_range: Vec<&UnitRuntime> = candidates
        .into_iter()
        .filter(|unit| unit.id != origin.id && world.distance(origin.pos, unit.pos) <= radius)
        .collect();
    in_range.sort_by_key(|unit| unit.id);
    in_range
}
