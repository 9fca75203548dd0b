use std::sync::Arc;

use crate::perk::Perk;
use crate::state::{Position, TeamId, UnitId};

/// Scratch counters owned by the perk engine. They live and die with the unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerkState {
    /// Attacks made since the last nth-attack bonus fired.
    pub attack_count: u32,
    /// Target of the most recent counted attack.
    pub last_target_id: Option<UnitId>,
}

/// One live combat unit as seen by the perk engine.
///
/// Everything except [`PerkState`] and the two informational multipliers is
/// owned by the simulation; in particular the engine never flips `alive`.
#[derive(Clone, Debug)]
pub struct UnitRuntime {
    pub id: UnitId,
    pub team: TeamId,
    pub pos: Position,
    pub alive: bool,
    pub hp: f32,
    pub max_hp: f32,
    /// Restricts ally-buff auras to leader units.
    pub is_squad_leader: bool,
    /// Assigned at deploy/rank-up; `None` means no perk logic runs.
    pub active_perk: Option<Arc<Perk>>,
    pub perk_state: PerkState,
    /// Last attacker-side multiplier computed for this unit.
    pub attack_multiplier: f32,
    /// Last defender-side multiplier computed for this unit.
    pub damage_taken_multiplier: f32,
}

impl UnitRuntime {
    /// Creates a living, perk-less unit at full health.
    pub fn new(id: UnitId, team: TeamId, pos: Position, max_hp: f32) -> Self {
        Self {
            id,
            team,
            pos,
            alive: true,
            hp: max_hp,
            max_hp,
            is_squad_leader: false,
            active_perk: None,
            perk_state: PerkState::default(),
            attack_multiplier: 1.0,
            damage_taken_multiplier: 1.0,
        }
    }

    #[must_use]
    pub fn with_perk(mut self, perk: Arc<Perk>) -> Self {
        self.active_perk = Some(perk);
        self
    }

    #[must_use]
    pub fn with_hp(mut self, hp: f32) -> Self {
        self.hp = hp;
        self
    }

    #[must_use]
    pub fn squad_leader(mut self) -> Self {
        self.is_squad_leader = true;
        self
    }

    /// Current health as a fraction of maximum.
    ///
    /// Returns `None` when `max_hp` is not positive, so threshold perks stay inert.
    pub fn hp_fraction(&self) -> Option<f32> {
        (self.max_hp > 0.0).then(|| self.hp / self.max_hp)
    }
}
