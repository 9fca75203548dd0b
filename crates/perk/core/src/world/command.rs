use core::fmt;
use core::time::Duration;

use arrayvec::ArrayVec;

use crate::state::UnitId;
use crate::world::WorldCommands;

/// Key identifying an effect's source for idempotent apply/refresh/expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EffectTag(&'static str);

impl EffectTag {
    pub const AURA_SLOW: Self = Self("perk_aura_slow");
    pub const ALLY_DMG: Self = Self("perk_ally_dmg");
    pub const FROZEN_VEIL: Self = Self("perk_frozen_veil");

    pub const fn new(tag: &'static str) -> Self {
        Self(tag)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for EffectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Stat a buff multiplies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffStat {
    #[strum(serialize = "atk_mult")]
    AttackMultiplier,
    #[strum(serialize = "dmg_taken_mult")]
    DamageTakenMultiplier,
}

pub const MAX_BUFF_FIELDS: usize = 4;

/// Keyed multiplier fields carried by a buff, at most one entry per stat.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffFields {
    entries: ArrayVec<(BuffStat, f32), MAX_BUFF_FIELDS>,
}

impl BuffFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `stat` to `value`, replacing any previous value for that stat.
    #[must_use]
    pub fn with(mut self, stat: BuffStat, value: f32) -> Self {
        self.set(stat, value);
        self
    }

    pub fn set(&mut self, stat: BuffStat, value: f32) {
        if let Some(existing) = self.entries.iter_mut().find(|(s, _)| *s == stat) {
            existing.1 = value;
            return;
        }
        if !self.entries.is_full() {
            self.entries.push((stat, value));
        }
    }

    pub fn get(&self, stat: BuffStat) -> Option<f32> {
        self.entries
            .iter()
            .find(|(s, _)| *s == stat)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuffStat, f32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An owned record of one [`WorldCommands`] call.
///
/// Entry points plan a list of these against a read-only world and then
/// dispatch them in order.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldCommand {
    TimedSlow {
        tag: EffectTag,
        target: UnitId,
        slow_pct: f32,
        duration: Duration,
    },
    ContinuousSlow {
        tag: EffectTag,
        target: UnitId,
        slow_pct: f32,
    },
    Buff {
        tag: EffectTag,
        target: UnitId,
        fields: BuffFields,
    },
}

impl WorldCommand {
    pub fn tag(&self) -> EffectTag {
        match self {
            Self::TimedSlow { tag, .. }
            | Self::ContinuousSlow { tag, .. }
            | Self::Buff { tag, .. } => *tag,
        }
    }

    pub fn target(&self) -> UnitId {
        match self {
            Self::TimedSlow { target, .. }
            | Self::ContinuousSlow { target, .. }
            | Self::Buff { target, .. } => *target,
        }
    }

    pub fn dispatch<W: WorldCommands + ?Sized>(&self, world: &mut W) {
        match self {
            Self::TimedSlow {
                tag,
                target,
                slow_pct,
                duration,
            } => world.apply_timed_slow(*tag, *target, *slow_pct, *duration),
            Self::ContinuousSlow {
                tag,
                target,
                slow_pct,
            } => world.apply_or_update_slow(*tag, *target, *slow_pct),
            Self::Buff {
                tag,
                target,
                fields,
            } => world.apply_or_update_buff(*tag, *target, fields),
        }
    }
}
