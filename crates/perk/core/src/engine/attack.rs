//! Attack-time multipliers.
//!
//! Both resolvers return a factor the caller multiplies into base damage.
//! They never apply damage themselves and only read the world; the single
//! mutation is the attacker's own nth-attack counter.

use tracing::trace;

use crate::engine::NEUTRAL_MULTIPLIER;
use crate::perk::PerkEffect;
use crate::state::UnitRuntime;
use crate::world::WorldQuery;

/// Attacker-side multiplier for one attack.
///
/// For `nth_attack_bonus` the attack counter is incremented; when it equals
/// `nth` the bonus is returned and the counter resets to zero. An `nth` of
/// zero never matches. Every other perk type returns `1.0` and leaves
/// [`crate::PerkState`] untouched.
pub fn on_attack_damage_multiplier(attacker: &mut UnitRuntime, target: &UnitRuntime) -> f32 {
    let Some(effect) = attacker.active_perk.as_ref().map(|perk| perk.effects) else {
        return NEUTRAL_MULTIPLIER;
    };

    match effect {
        PerkEffect::NthAttackBonus { nth, bonus_dmg_pct } => {
            let state = &mut attacker.perk_state;
            state.attack_count = state.attack_count.saturating_add(1);
            state.last_target_id = Some(target.id);

            if state.attack_count == nth {
                state.attack_count = 0;
                let multiplier = 1.0 + bonus_dmg_pct;
                trace!(target: "perk::attack", attacker = %attacker.id, target_unit = %target.id, multiplier, "nth attack bonus");
                multiplier
            } else {
                NEUTRAL_MULTIPLIER
            }
        }
        PerkEffect::AuraSlow { .. }
        | PerkEffect::AuraAllyDmg { .. }
        | PerkEffect::ConditionalDrNearAlly { .. }
        | PerkEffect::LowHpArmor { .. }
        | PerkEffect::OnDeathAoeSlow { .. }
        | PerkEffect::Inert => NEUTRAL_MULTIPLIER,
    }
}

/// Defender-side multiplier for one incoming hit.
///
/// `attacker` is accepted for symmetry with the attack resolver; no current
/// perk type reads it.
pub fn on_damage_taken_multiplier<W: WorldQuery + ?Sized>(
    world: &W,
    target: &UnitRuntime,
    attacker: &UnitRuntime,
) -> f32 {
    let Some(effect) = target.active_perk.as_ref().map(|perk| perk.effects) else {
        return NEUTRAL_MULTIPLIER;
    };

    let multiplier = match effect {
        PerkEffect::ConditionalDrNearAlly {
            dr_pct,
            ally_radius,
        } => {
            let ally_near = world.allies_of(target).into_iter().any(|ally| {
                ally.id != target.id
                    && world.same_team(ally, target)
                    && world.distance(target.pos, ally.pos) <= ally_radius
            });
            if ally_near { 1.0 - dr_pct } else { NEUTRAL_MULTIPLIER }
        }
        PerkEffect::LowHpArmor {
            armor_bonus_pct,
            hp_threshold_pct,
        } => match target.hp_fraction() {
            Some(fraction) if fraction <= hp_threshold_pct => 1.0 - armor_bonus_pct,
            _ => NEUTRAL_MULTIPLIER,
        },
        PerkEffect::AuraSlow { .. }
        | PerkEffect::AuraAllyDmg { .. }
        | PerkEffect::NthAttackBonus { .. }
        | PerkEffect::OnDeathAoeSlow { .. }
        | PerkEffect::Inert => NEUTRAL_MULTIPLIER,
    };

    if multiplier != NEUTRAL_MULTIPLIER {
        trace!(target: "perk::attack", defender = %target.id, attacker = %attacker.id, multiplier, "damage taken reduced");
    }
    multiplier
}
