use std::collections::BTreeMap;
use std::time::Duration;

use perk_content::PerkCatalog;
use perk_core::{
    AuraClock, BalanceConfig, BuffFields, CommandLog, EffectStore, EffectTag, PerkState, Position,
    SimTime, UnitId, UnitRuntime, WorldCommand, WorldCommands, WorldQuery,
    on_attack_damage_multiplier, on_damage_taken_multiplier, on_unit_death, tick_perk_auras,
};
use tracing::{debug, info};

use crate::RoomError;

/// Breakdown of one resolved attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackOutcome {
    /// Attacker-side perk multiplier.
    pub perk_multiplier: f32,
    /// Product of attack buffs active on the attacker.
    pub buff_multiplier: f32,
    /// Defender-side perk multiplier.
    pub damage_taken_multiplier: f32,
    /// Damage subtracted from the target's HP.
    pub damage: f32,
    /// True if this attack killed the target.
    pub killed: bool,
}

/// One battle's units, effects, and clock.
#[derive(Debug)]
pub struct BattleRoom {
    now: SimTime,
    clock: AuraClock,
    units: BTreeMap<UnitId, UnitRuntime>,
    effects: EffectStore,
    log: CommandLog,
}

impl BattleRoom {
    pub fn new(config: &BalanceConfig) -> Result<Self, RoomError> {
        config.validate()?;
        Ok(Self {
            now: SimTime::ZERO,
            clock: AuraClock::from_config(config),
            units: BTreeMap::new(),
            effects: EffectStore::from_config(config),
            log: CommandLog::new(),
        })
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn deploy(&mut self, unit: UnitRuntime) -> Result<(), RoomError> {
        if self.units.contains_key(&unit.id) {
            return Err(RoomError::DuplicateUnit(unit.id));
        }
        debug!(target: "room", unit = %unit.id, team = %unit.team, "deployed");
        self.units.insert(unit.id, unit);
        Ok(())
    }

    /// Removes a unit and every effect on it.
    pub fn despawn(&mut self, id: UnitId) -> Result<UnitRuntime, RoomError> {
        let unit = self.units.remove(&id).ok_or(RoomError::UnknownUnit(id))?;
        self.effects.remove_target(id);
        Ok(unit)
    }

    /// Equips `perk_id` from `catalog` on unit `id`.
    ///
    /// An unknown (unit name, perk id) pair leaves the unit without a perk and
    /// returns `Ok(false)`. Perk counters start over either way.
    pub fn equip(
        &mut self,
        id: UnitId,
        catalog: &PerkCatalog,
        unit_name: &str,
        perk_id: &str,
    ) -> Result<bool, RoomError> {
        let unit = self.units.get_mut(&id).ok_or(RoomError::UnknownUnit(id))?;
        let perk = catalog.load_unit_perk(unit_name, perk_id);
        let found = perk.is_some();
        if !found {
            debug!(target: "room", unit = %id, unit_name, perk_id, "perk not in catalog, unit has no perk");
        }
        unit.active_perk = perk;
        unit.perk_state = PerkState::default();
        Ok(found)
    }

    pub fn move_unit(&mut self, id: UnitId, pos: Position) -> Result<(), RoomError> {
        let unit = self.units.get_mut(&id).ok_or(RoomError::UnknownUnit(id))?;
        unit.pos = pos;
        Ok(())
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitRuntime> {
        self.units.get(&id)
    }

    /// Advances the room by one frame.
    ///
    /// Runs every aura tick that fell due, then drops lapsed effects.
    /// Returns the number of aura ticks run.
    pub fn step(&mut self, dt: Duration) -> u32 {
        self.now += dt;
        let due = self.clock.advance(dt);
        let interval = self.clock.interval();
        for _ in 0..due {
            tick_perk_auras(self, interval);
        }
        let expired = self.effects.expire(self.now);
        if expired > 0 {
            debug!(target: "room", now_ms = self.now.as_millis(), expired, "effects expired");
        }
        due
    }

    /// Resolves one landed attack of `base_damage`.
    ///
    /// Perk and buff multipliers are folded into the damage; if the target
    /// drops to zero HP it is marked dead and its death trigger fires.
    pub fn resolve_attack(
        &mut self,
        attacker: UnitId,
        target: UnitId,
        base_damage: f32,
    ) -> Result<AttackOutcome, RoomError> {
        let target_snapshot = self.living(target)?.clone();
        self.living(attacker)?;

        let attacker_unit = self
            .units
            .get_mut(&attacker)
            .ok_or(RoomError::UnknownUnit(attacker))?;
        let perk_multiplier = on_attack_damage_multiplier(attacker_unit, &target_snapshot);
        attacker_unit.attack_multiplier = perk_multiplier;
        let attacker_snapshot = attacker_unit.clone();

        let buff_multiplier = self.effects.attack_multiplier(attacker);
        let damage_taken_multiplier =
            on_damage_taken_multiplier(&*self, &target_snapshot, &attacker_snapshot);
        let taken_buff = self.effects.damage_taken_multiplier(target);

        let damage = (base_damage
            * perk_multiplier
            * buff_multiplier
            * damage_taken_multiplier
            * taken_buff)
            .max(0.0);

        let target_unit = self
            .units
            .get_mut(&target)
            .ok_or(RoomError::UnknownUnit(target))?;
        target_unit.damage_taken_multiplier = damage_taken_multiplier;
        target_unit.hp = (target_unit.hp - damage).max(0.0);
        let killed = target_unit.hp <= 0.0;

        debug!(
            target: "room",
            attacker = %attacker,
            target_unit = %target,
            damage,
            perk_multiplier,
            buff_multiplier,
            damage_taken_multiplier,
            "attack resolved"
        );

        if killed {
            self.mark_dead(target)?;
        }

        Ok(AttackOutcome {
            perk_multiplier,
            buff_multiplier,
            damage_taken_multiplier,
            damage,
            killed,
        })
    }

    /// Kills a unit outside attack resolution (tower shot, lane timeout).
    ///
    /// Returns `Ok(false)` if the unit was already dead; the death trigger
    /// only ever fires on the alive → dead transition.
    pub fn kill(&mut self, id: UnitId) -> Result<bool, RoomError> {
        let unit = self.units.get(&id).ok_or(RoomError::UnknownUnit(id))?;
        if !unit.alive {
            return Ok(false);
        }
        self.mark_dead(id)?;
        Ok(true)
    }

    fn mark_dead(&mut self, id: UnitId) -> Result<(), RoomError> {
        let unit = self.units.get_mut(&id).ok_or(RoomError::UnknownUnit(id))?;
        unit.alive = false;
        unit.hp = 0.0;
        let dead = unit.clone();

        let affected = on_unit_death(&dead, self);
        info!(target: "room", unit = %id, affected, "unit died");
        Ok(())
    }

    fn living(&self, id: UnitId) -> Result<&UnitRuntime, RoomError> {
        let unit = self.units.get(&id).ok_or(RoomError::UnknownUnit(id))?;
        if unit.alive {
            Ok(unit)
        } else {
            Err(RoomError::UnitDead(id))
        }
    }

    /// Strongest slow currently on `id`.
    pub fn slow_pct(&self, id: UnitId) -> f32 {
        self.effects.slow_pct(id)
    }

    /// Product of attack buffs currently on `id`.
    pub fn attack_buff(&self, id: UnitId) -> f32 {
        self.effects.attack_multiplier(id)
    }

    pub fn effects(&self) -> &EffectStore {
        &self.effects
    }

    /// Every command the engine has issued in this room, in order.
    pub fn command_log(&self) -> &CommandLog {
        &self.log
    }
}

/// `units_all` keeps corpses until despawn so the death trigger sees the full
/// roster; ally and enemy lookups only list the living.
impl WorldQuery for BattleRoom {
    fn units_all(&self) -> Vec<&UnitRuntime> {
        self.units.values().collect()
    }

    fn allies_of(&self, unit: &UnitRuntime) -> Vec<&UnitRuntime> {
        self.units
            .values()
            .filter(|other| other.alive && other.id != unit.id && self.same_team(other, unit))
            .collect()
    }

    fn enemies_of(&self, unit: &UnitRuntime) -> Vec<&UnitRuntime> {
        self.units
            .values()
            .filter(|other| other.alive && !self.same_team(other, unit))
            .collect()
    }
}

impl WorldCommands for BattleRoom {
    fn apply_timed_slow(
        &mut self,
        tag: EffectTag,
        target: UnitId,
        slow_pct: f32,
        duration: Duration,
    ) {
        self.log.record(WorldCommand::TimedSlow {
            tag,
            target,
            slow_pct,
            duration,
        });
        self.effects
            .apply_timed_slow(self.now, tag, target, slow_pct, duration);
    }

    fn apply_or_update_slow(&mut self, tag: EffectTag, target: UnitId, slow_pct: f32) {
        self.log.record(WorldCommand::ContinuousSlow {
            tag,
            target,
            slow_pct,
        });
        self.effects
            .apply_or_update_slow(self.now, tag, target, slow_pct);
    }

    fn apply_or_update_buff(&mut self, tag: EffectTag, target: UnitId, fields: &BuffFields) {
        self.log.record(WorldCommand::Buff {
            tag,
            target,
            fields: fields.clone(),
        });
        self.effects
            .apply_or_update_buff(self.now, tag, target, fields);
    }
}
