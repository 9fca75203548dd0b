//! Deterministic perk engine for lane-battle combat.
//!
//! `perk-core` computes how unit-bound perks alter damage, emit auras, and
//! trigger on-death effects inside a battle room's fixed-timestep loop. The
//! room drives four entry points (see [`engine`]); they read unit state and
//! the [`World`] seam and issue tag-keyed effect commands back through it.
//! Nothing here blocks, allocates threads, or holds state between calls
//! beyond each unit's [`PerkState`].
pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod perk;
pub mod state;
pub mod world;

pub use config::BalanceConfig;
pub use effects::{ActiveEffect, EffectLifetime, EffectPayload, EffectStore};
pub use engine::{
    AuraClock, NEUTRAL_MULTIPLIER, on_attack_damage_multiplier, on_damage_taken_multiplier,
    on_unit_death, plan_perk_auras, plan_unit_death, tick_perk_auras,
};
pub use error::{CombatError, ConfigError, ErrorSeverity, PerkError};
pub use perk::{Perk, PerkEffect, PerkEffectKind};
pub use state::{PerkState, Position, SimTime, TeamId, UnitId, UnitRuntime};
pub use world::{
    BuffFields, BuffStat, CommandLog, EffectTag, World, WorldCommand, WorldCommands, WorldQuery,
};
