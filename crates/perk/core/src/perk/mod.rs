//! Perk definitions.
//!
//! A perk is a passive ability bound to a unit with exactly one typed
//! effect. Behaviour is selected by the [`PerkEffect`] variant; the entry
//! points in [`crate::engine`] each match on it exhaustively, so a new perk
//! type is a new variant plus the arms that give it meaning.

use crate::error::PerkError;

/// Immutable perk definition as authored in the catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perk {
    pub id: String,
    pub name: String,
    pub effects: PerkEffect,
}

/// The single effect carried by a perk.
///
/// Each variant holds only the parameters its type uses. Percentages are
/// fractions (`0.20` = 20%); radii are in map units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum PerkEffect {
    /// Owner continuously slows enemies within `radius`.
    AuraSlow { radius: f32, slow_pct: f32 },

    /// Owner, if a squad leader, continuously buffs allies' attack within `radius`.
    AuraAllyDmg { radius: f32, ally_dmg_pct: f32 },

    /// Every `nth` attack by the owner deals bonus damage.
    NthAttackBonus { nth: u32, bonus_dmg_pct: f32 },

    /// Owner takes reduced damage while an ally stands within `ally_radius`.
    ConditionalDrNearAlly { dr_pct: f32, ally_radius: f32 },

    /// Owner takes reduced damage once its HP fraction is at or below the threshold.
    LowHpArmor {
        armor_bonus_pct: f32,
        hp_threshold_pct: f32,
    },

    /// On the owner's death, slows enemies within `radius` for `duration_ms`.
    #[cfg_attr(feature = "serde", serde(rename = "ondeath_aoe_slow"))]
    OnDeathAoeSlow {
        radius: f32,
        slow_pct: f32,
        duration_ms: u32,
    },

    /// Unrecognised effect type. Never does anything.
    #[cfg_attr(feature = "serde", serde(other))]
    Inert,
}

/// Discriminant of [`PerkEffect`], named exactly as in catalog data.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum PerkEffectKind {
    AuraSlow,
    AuraAllyDmg,
    NthAttackBonus,
    ConditionalDrNearAlly,
    LowHpArmor,
    #[strum(serialize = "ondeath_aoe_slow")]
    OnDeathAoeSlow,
    Inert,
}

impl PerkEffect {
    pub const fn kind(&self) -> PerkEffectKind {
        match self {
            Self::AuraSlow { .. } => PerkEffectKind::AuraSlow,
            Self::AuraAllyDmg { .. } => PerkEffectKind::AuraAllyDmg,
            Self::NthAttackBonus { .. } => PerkEffectKind::NthAttackBonus,
            Self::ConditionalDrNearAlly { .. } => PerkEffectKind::ConditionalDrNearAlly,
            Self::LowHpArmor { .. } => PerkEffectKind::LowHpArmor,
            Self::OnDeathAoeSlow { .. } => PerkEffectKind::OnDeathAoeSlow,
            Self::Inert => PerkEffectKind::Inert,
        }
    }

    /// True for effects evaluated by the aura tick.
    pub const fn is_aura(&self) -> bool {
        matches!(self, Self::AuraSlow { .. } | Self::AuraAllyDmg { .. })
    }
}

impl Perk {
    pub fn new(id: impl Into<String>, name: impl Into<String>, effects: PerkEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effects,
        }
    }

    pub fn kind(&self) -> PerkEffectKind {
        self.effects.kind()
    }

    /// Checks the parameters relevant to this perk's effect type.
    ///
    /// Fields of other types do not exist on the variant, so they cannot fail.
    pub fn validate(&self) -> Result<(), PerkError> {
        if self.id.trim().is_empty() {
            return Err(PerkError::EmptyId);
        }

        match self.effects {
            PerkEffect::AuraSlow { radius, slow_pct } => {
                self.check_radius("radius", radius)?;
                self.check_pct("slow_pct", slow_pct)
            }
            PerkEffect::AuraAllyDmg {
                radius,
                ally_dmg_pct,
            } => {
                self.check_radius("radius", radius)?;
                self.check_pct("ally_dmg_pct", ally_dmg_pct)
            }
            PerkEffect::NthAttackBonus { nth, bonus_dmg_pct } => {
                if nth == 0 {
                    return Err(PerkError::ZeroNth {
                        perk: self.id.clone(),
                    });
                }
                self.check_pct("bonus_dmg_pct", bonus_dmg_pct)
            }
            PerkEffect::ConditionalDrNearAlly {
                dr_pct,
                ally_radius,
            } => {
                self.check_pct("dr_pct", dr_pct)?;
                self.check_radius("ally_radius", ally_radius)
            }
            PerkEffect::LowHpArmor {
                armor_bonus_pct,
                hp_threshold_pct,
            } => {
                self.check_pct("armor_bonus_pct", armor_bonus_pct)?;
                self.check_pct("hp_threshold_pct", hp_threshold_pct)
            }
            PerkEffect::OnDeathAoeSlow {
                radius,
                slow_pct,
                duration_ms,
            } => {
                self.check_radius("radius", radius)?;
                self.check_pct("slow_pct", slow_pct)?;
                if duration_ms == 0 {
                    return Err(PerkError::ZeroDuration {
                        perk: self.id.clone(),
                    });
                }
                Ok(())
            }
            PerkEffect::Inert => Ok(()),
        }
    }

    fn check_pct(&self, field: &'static str, value: f32) -> Result<(), PerkError> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(PerkError::PercentOutOfRange {
                perk: self.id.clone(),
                field,
                value,
            })
        }
    }

    fn check_radius(&self, field: &'static str, value: f32) -> Result<(), PerkError> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(PerkError::InvalidRadius {
                perk: self.id.clone(),
                field,
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn kind_names_match_catalog_type_strings() {
        let names: Vec<&'static str> = PerkEffectKind::iter().map(Into::into).collect();
        assert_eq!(
            names,
            [
                "aura_slow",
                "aura_ally_dmg",
                "nth_attack_bonus",
                "conditional_dr_near_ally",
                "low_hp_armor",
                "ondeath_aoe_slow",
                "inert",
            ]
        );
        assert_eq!(
            PerkEffectKind::from_str("ondeath_aoe_slow"),
            Ok(PerkEffectKind::OnDeathAoeSlow)
        );
    }

    #[test]
    fn valid_perk_passes() {
        let perk = Perk::new(
            "frost_aura",
            "Frost Aura",
            PerkEffect::AuraSlow {
                radius: 50.0,
                slow_pct: 0.2,
            },
        );
        assert!(perk.validate().is_ok());
        assert_eq!(perk.kind(), PerkEffectKind::AuraSlow);
        assert!(perk.effects.is_aura());
    }

    #[test]
    fn rejects_percentages_above_one() {
        let perk = Perk::new(
            "last_stand",
            "Last Stand",
            PerkEffect::LowHpArmor {
                armor_bonus_pct: 1.5,
                hp_threshold_pct: 0.3,
            },
        );
        assert_eq!(
            perk.validate(),
            Err(PerkError::PercentOutOfRange {
                perk: "last_stand".into(),
                field: "armor_bonus_pct",
                value: 1.5,
            })
        );
    }

    #[test]
    fn rejects_negative_and_nan_radius() {
        let negative = Perk::new(
            "shield_wall",
            "Shield Wall",
            PerkEffect::ConditionalDrNearAlly {
                dr_pct: 0.15,
                ally_radius: -1.0,
            },
        );
        assert!(matches!(
            negative.validate(),
            Err(PerkError::InvalidRadius { field: "ally_radius", .. })
        ));

        let nan = Perk::new(
            "frost_aura",
            "Frost Aura",
            PerkEffect::AuraSlow {
                radius: f32::NAN,
                slow_pct: 0.2,
            },
        );
        assert!(matches!(
            nan.validate(),
            Err(PerkError::InvalidRadius { field: "radius", .. })
        ));
    }

    #[test]
    fn rejects_zero_nth_and_zero_duration() {
        let nth = Perk::new(
            "cleave",
            "Cleave",
            PerkEffect::NthAttackBonus {
                nth: 0,
                bonus_dmg_pct: 0.4,
            },
        );
        assert!(matches!(nth.validate(), Err(PerkError::ZeroNth { .. })));

        let veil = Perk::new(
            "frozen_veil",
            "Frozen Veil",
            PerkEffect::OnDeathAoeSlow {
                radius: 80.0,
                slow_pct: 0.5,
                duration_ms: 0,
            },
        );
        assert!(matches!(veil.validate(), Err(PerkError::ZeroDuration { .. })));
    }

    #[test]
    fn rejects_blank_id() {
        let perk = Perk::new("  ", "Nameless", PerkEffect::Inert);
        assert_eq!(perk.validate(), Err(PerkError::EmptyId));
    }
}
