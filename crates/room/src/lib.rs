//! Reference battle room hosting the perk engine.
//!
//! A [`BattleRoom`] is the single-threaded owner of one battle's units. It
//! implements the [`perk_core::World`] seam over an [`perk_core::EffectStore`],
//! runs the aura cadence from frame time, multiplies perk multipliers into
//! base damage, and fires each unit's death trigger exactly once. Rooms share
//! nothing, so a server runs as many of them in parallel as it likes.
mod error;
mod room;

pub use error::RoomError;
pub use room::{AttackOutcome, BattleRoom};
