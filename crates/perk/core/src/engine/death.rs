use tracing::debug;

use crate::engine::within_radius;
use crate::perk::PerkEffect;
use crate::state::UnitRuntime;
use crate::world::{EffectTag, World, WorldCommand, WorldQuery};

/// Plans the on-death effect of `unit` without touching the world.
///
/// Targets are every unit not on the dying unit's team within the perk
/// radius, in id order. No alive filter is applied here; which units the
/// world still lists is the world's decision.
pub fn plan_unit_death<W: WorldQuery + ?Sized>(world: &W, unit: &UnitRuntime) -> Vec<WorldCommand> {
    let Some(effect) = unit.active_perk.as_ref().map(|perk| perk.effects) else {
        return Vec::new();
    };

    match effect {
        PerkEffect::OnDeathAoeSlow {
            radius,
            slow_pct,
            duration_ms,
        } => {
            let opponents: Vec<&UnitRuntime> = world
                .units_all()
                .into_iter()
                .filter(|other| !world.same_team(other, unit))
                .collect();
            let duration = core::time::Duration::from_millis(u64::from(duration_ms));
            within_radius(world, unit, opponents, radius)
                .into_iter()
                .map(|enemy| WorldCommand::TimedSlow {
                    tag: EffectTag::FROZEN_VEIL,
                    target: enemy.id,
                    slow_pct,
                    duration,
                })
                .collect()
        }
        PerkEffect::AuraSlow { .. }
        | PerkEffect::AuraAllyDmg { .. }
        | PerkEffect::NthAttackBonus { .. }
        | PerkEffect::ConditionalDrNearAlly { .. }
        | PerkEffect::LowHpArmor { .. }
        | PerkEffect::Inert => Vec::new(),
    }
}

/// Fires the death trigger of `unit`.
///
/// Must be called exactly once per death; calling it twice issues the
/// commands twice. Returns the number of commands issued.
pub fn on_unit_death<W: World + ?Sized>(unit: &UnitRuntime, world: &mut W) -> usize {
    let commands = plan_unit_death(&*world, unit);
    for command in &commands {
        command.dispatch(world);
    }
    if !commands.is_empty() {
        debug!(target: "perk::death", unit = %unit.id, affected = commands.len(), "death trigger fired");
    }
    commands.len()
}
