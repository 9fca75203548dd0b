//! The capability surface the engine needs from the battle simulation.
//!
//! The simulation implements [`WorldQuery`] (spatial and team relationships)
//! and [`WorldCommands`] (tag-keyed status effects). Every command is
//! idempotent per `(tag, target)`: repeating it re-asserts or extends the
//! effect, it never stacks. That contract is what lets the aura tick call
//! the commands unconditionally without tracking what is already applied.
mod command;
mod log;

pub use command::{BuffFields, BuffStat, EffectTag, MAX_BUFF_FIELDS, WorldCommand};
pub use log::CommandLog;

use core::time::Duration;

use crate::state::{Position, UnitId, UnitRuntime};

/// Read-only spatial and team queries.
///
/// Only [`WorldQuery::units_all`] is required; the remaining methods default
/// to plain team equality and Euclidean distance.
pub trait WorldQuery {
    /// Every unit registered in the battle.
    fn units_all(&self) -> Vec<&UnitRuntime>;

    /// Units on `unit`'s team, excluding `unit` itself.
    fn allies_of(&self, unit: &UnitRuntime) -> Vec<&UnitRuntime> {
        self.units_all()
            .into_iter()
            .filter(|other| other.id != unit.id && self.same_team(other, unit))
            .collect()
    }

    /// Units not on `unit`'s team.
    fn enemies_of(&self, unit: &UnitRuntime) -> Vec<&UnitRuntime> {
        self.units_all()
            .into_iter()
            .filter(|other| !self.same_team(other, unit))
            .collect()
    }

    /// Distance between two map positions. Override for map-specific scaling.
    fn distance(&self, a: Position, b: Position) -> f32 {
        a.distance_to(b)
    }

    fn same_team(&self, a: &UnitRuntime, b: &UnitRuntime) -> bool {
        a.team == b.team
    }
}

/// Effect-application commands issued back into the simulation.
pub trait WorldCommands {
    /// Installs or refreshes a slow that lapses after `duration`.
    fn apply_timed_slow(
        &mut self,
        tag: EffectTag,
        target: UnitId,
        slow_pct: f32,
        duration: Duration,
    );

    /// Installs or refreshes a slow with no fixed expiry. It lapses once the
    /// caller stops refreshing it.
    fn apply_or_update_slow(&mut self, tag: EffectTag, target: UnitId, slow_pct: f32);

    /// Installs or refreshes a keyed multiplier buff.
    fn apply_or_update_buff(&mut self, tag: EffectTag, target: UnitId, fields: &BuffFields);
}

/// Full world capability required by the entry points that issue commands.
pub trait World: WorldQuery + WorldCommands {}

impl<T: WorldQuery + WorldCommands + ?Sized> World for T {}
