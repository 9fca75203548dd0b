use core::time::Duration;

use tracing::{debug, trace};

use crate::config::BalanceConfig;
use crate::engine::within_radius;
use crate::perk::PerkEffect;
use crate::state::UnitRuntime;
use crate::world::{BuffFields, BuffStat, EffectTag, World, WorldCommand, WorldQuery};

/// Plans one aura tick without touching the world.
///
/// Owners are visited in ascending id order and each owner's targets in
/// ascending id order, so the command stream is identical across replays.
/// Slows are issued with `duration = dt`: an enemy that leaves range simply
/// stops being refreshed and the slow lapses on its own.
pub fn plan_perk_auras<W: WorldQuery + ?Sized>(world: &W, dt: Duration) -> Vec<WorldCommand> {
    let mut owners: Vec<&UnitRuntime> = world
        .units_all()
        .into_iter()
        .filter(|unit| unit.alive && unit.active_perk.is_some())
        .collect();
    owners.sort_by_key(|unit| unit.id);

    let mut commands = Vec::new();
    for owner in owners {
        let Some(effect) = owner.active_perk.as_ref().map(|perk| perk.effects) else {
            continue;
        };

        match effect {
            PerkEffect::AuraSlow { radius, slow_pct } => {
                for enemy in within_radius(world, owner, world.enemies_of(owner), radius) {
                    trace!(target: "perk::aura", owner = %owner.id, target_unit = %enemy.id, slow_pct, "aura slow");
                    commands.push(WorldCommand::TimedSlow {
                        tag: EffectTag::AURA_SLOW,
                        target: enemy.id,
                        slow_pct,
                        duration: dt,
                    });
                }
            }
            PerkEffect::AuraAllyDmg {
                radius,
                ally_dmg_pct,
            } => {
                if !owner.is_squad_leader {
                    continue;
                }
                let fields = BuffFields::new().with(BuffStat::AttackMultiplier, 1.0 + ally_dmg_pct);
                for ally in within_radius(world, owner, world.allies_of(owner), radius) {
                    trace!(target: "perk::aura", owner = %owner.id, target_unit = %ally.id, ally_dmg_pct, "ally damage buff");
                    commands.push(WorldCommand::Buff {
                        tag: EffectTag::ALLY_DMG,
                        target: ally.id,
                        fields: fields.clone(),
                    });
                }
            }
            PerkEffect::NthAttackBonus { .. }
            | PerkEffect::ConditionalDrNearAlly { .. }
            | PerkEffect::LowHpArmor { .. }
            | PerkEffect::OnDeathAoeSlow { .. }
            | PerkEffect::Inert => {}
        }
    }

    commands
}

/// Runs one aura tick: plans against the world, then dispatches in order.
///
/// Performs no cleanup of its own. Expiry is the world's job.
/// Returns the number of commands issued.
pub fn tick_perk_auras<W: World + ?Sized>(world: &mut W, dt: Duration) -> usize {
    let commands = plan_perk_auras(&*world, dt);
    for command in &commands {
        command.dispatch(world);
    }
    debug!(target: "perk::aura", commands = commands.len(), dt_ms = dt.as_millis() as u64, "aura tick");
    commands.len()
}

/// Fixed-cadence accumulator for aura ticks.
///
/// The room feeds it variable frame times; it reports how many whole aura
/// intervals have elapsed and carries the remainder to the next frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuraClock {
    interval: Duration,
    carried: Duration,
}

impl AuraClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            carried: Duration::ZERO,
        }
    }

    pub fn from_config(config: &BalanceConfig) -> Self {
        Self::new(config.aura_tick_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Adds `dt` and returns how many ticks are now due. A zero interval never ticks.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.carried += dt;
        let mut due = 0;
        while self.carried >= self.interval {
            self.carried -= self.interval;
            due += 1;
        }
        due
    }
}
