//! Tag-keyed status effect store with automatic expiry.
//!
//! This is the state behind a simulation's [`crate::WorldCommands`]
//! implementation. Entries are keyed by `(target, tag)`, so re-applying the
//! same tag refreshes an entry instead of stacking a second one.
//!
//! # Lifetimes
//!
//! - Timed effects store `expires_at` and are dropped when `now >= expires_at`.
//!   Re-application keeps the later expiry.
//! - Continuous effects store the time of their last refresh and are dropped
//!   once `refreshed_at + grace <= now`.

use std::collections::BTreeMap;

use core::time::Duration;

use crate::config::BalanceConfig;
use crate::state::{SimTime, UnitId};
use crate::world::{BuffFields, BuffStat, EffectTag};

/// What an active effect does to its target.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectPayload {
    Slow { slow_pct: f32 },
    Buff { fields: BuffFields },
}

/// How an active effect ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectLifetime {
    /// Fixed expiry.
    ExpiresAt(SimTime),
    /// Kept alive by refreshes; lapses `grace` after the last one.
    Refreshed(SimTime),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActiveEffect {
    pub payload: EffectPayload,
    pub lifetime: EffectLifetime,
}

#[derive(Clone, Debug)]
pub struct EffectStore {
    entries: BTreeMap<(UnitId, EffectTag), ActiveEffect>,
    grace: Duration,
}

impl EffectStore {
    pub fn new(grace: Duration) -> Self {
        Self {
            entries: BTreeMap::new(),
            grace,
        }
    }

    pub fn from_config(config: &BalanceConfig) -> Self {
        Self::new(config.continuous_effect_grace())
    }

    /// Installs or extends a timed slow. The slow percentage is overwritten.
    pub fn apply_timed_slow(
        &mut self,
        now: SimTime,
        tag: EffectTag,
        target: UnitId,
        slow_pct: f32,
        duration: Duration,
    ) {
        let requested = now + duration;
        let expires_at = match self.entries.get(&(target, tag)) {
            Some(ActiveEffect {
                lifetime: EffectLifetime::ExpiresAt(existing),
                ..
            }) => requested.max(*existing),
            _ => requested,
        };
        self.entries.insert(
            (target, tag),
            ActiveEffect {
                payload: EffectPayload::Slow { slow_pct },
                lifetime: EffectLifetime::ExpiresAt(expires_at),
            },
        );
    }

    /// Installs or refreshes a continuous slow.
    pub fn apply_or_update_slow(
        &mut self,
        now: SimTime,
        tag: EffectTag,
        target: UnitId,
        slow_pct: f32,
    ) {
        self.entries.insert(
            (target, tag),
            ActiveEffect {
                payload: EffectPayload::Slow { slow_pct },
                lifetime: EffectLifetime::Refreshed(now),
            },
        );
    }

    /// Installs or refreshes a continuous buff.
    pub fn apply_or_update_buff(
        &mut self,
        now: SimTime,
        tag: EffectTag,
        target: UnitId,
        fields: &BuffFields,
    ) {
        self.entries.insert(
            (target, tag),
            ActiveEffect {
                payload: EffectPayload::Buff {
                    fields: fields.clone(),
                },
                lifetime: EffectLifetime::Refreshed(now),
            },
        );
    }

    /// Drops every effect that has lapsed at `now`. Returns how many were removed.
    pub fn expire(&mut self, now: SimTime) -> usize {
        let grace = self.grace;
        let before = self.entries.len();
        self.entries
            .retain(|_, effect| Self::is_live(effect.lifetime, grace, now));
        before - self.entries.len()
    }

    fn is_live(lifetime: EffectLifetime, grace: Duration, now: SimTime) -> bool {
        match lifetime {
            EffectLifetime::ExpiresAt(at) => at > now,
            EffectLifetime::Refreshed(at) => at + grace > now,
        }
    }

    pub fn get(&self, tag: EffectTag, target: UnitId) -> Option<&ActiveEffect> {
        self.entries.get(&(target, tag))
    }

    pub fn contains(&self, tag: EffectTag, target: UnitId) -> bool {
        self.entries.contains_key(&(target, tag))
    }

    fn effects_on(&self, target: UnitId) -> impl Iterator<Item = (EffectTag, &ActiveEffect)> + '_ {
        self.entries
            .range((target, EffectTag::new(""))..)
            .take_while(move |((id, _), _)| *id == target)
            .map(|((_, tag), effect)| (*tag, effect))
    }

    /// Strongest slow currently on `target`; slows from different tags do not add up.
    pub fn slow_pct(&self, target: UnitId) -> f32 {
        self.effects_on(target)
            .filter_map(|(_, effect)| match effect.payload {
                EffectPayload::Slow { slow_pct } => Some(slow_pct),
                EffectPayload::Buff { .. } => None,
            })
            .fold(0.0, f32::max)
    }

    /// Product of every buff's value for `stat` on `target`, `1.0` if none.
    pub fn buff_multiplier(&self, target: UnitId, stat: BuffStat) -> f32 {
        self.effects_on(target)
            .filter_map(|(_, effect)| match &effect.payload {
                EffectPayload::Buff { fields } => fields.get(stat),
                EffectPayload::Slow { .. } => None,
            })
            .product()
    }

    pub fn attack_multiplier(&self, target: UnitId) -> f32 {
        self.buff_multiplier(target, BuffStat::AttackMultiplier)
    }

    pub fn damage_taken_multiplier(&self, target: UnitId) -> f32 {
        self.buff_multiplier(target, BuffStat::DamageTakenMultiplier)
    }

    /// Forgets every effect on `target`, e.g. when the unit is despawned.
    pub fn remove_target(&mut self, target: UnitId) {
        self.entries.retain(|(id, _), _| *id != target);
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitId, EffectTag, &ActiveEffect)> + '_ {
        self.entries
            .iter()
            .map(|((target, tag), effect)| (*target, *tag, effect))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EffectStore {
    fn default() -> Self {
        Self::from_config(&BalanceConfig::default())
    }
}
