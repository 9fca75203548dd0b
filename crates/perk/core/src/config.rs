use core::time::Duration;

use crate::error::ConfigError;

/// Balance parameters shared with the rest of the battle server.
///
/// The perk engine does not own these values; it reads them so the aura
/// cadence and the lifetime of continuously refreshed effects stay in step
/// with the hosting simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceConfig {
    /// Fixed interval between two aura ticks, in milliseconds.
    pub aura_tick_interval_ms: u32,
    /// How long an `apply_or_update_*` effect survives without being
    /// refreshed, in milliseconds.
    pub continuous_effect_grace_ms: u32,
}

impl BalanceConfig {
    pub const DEFAULT_AURA_TICK_INTERVAL_MS: u32 = 200;
    pub const DEFAULT_CONTINUOUS_EFFECT_GRACE_MS: u32 = 200;

    pub fn new() -> Self {
        Self {
            aura_tick_interval_ms: Self::DEFAULT_AURA_TICK_INTERVAL_MS,
            continuous_effect_grace_ms: Self::DEFAULT_CONTINUOUS_EFFECT_GRACE_MS,
        }
    }

    #[must_use]
    pub fn with_aura_tick_interval_ms(mut self, ms: u32) -> Self {
        self.aura_tick_interval_ms = ms;
        self
    }

    #[must_use]
    pub fn with_continuous_effect_grace_ms(mut self, ms: u32) -> Self {
        self.continuous_effect_grace_ms = ms;
        self
    }

    pub fn aura_tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.aura_tick_interval_ms))
    }

    pub fn continuous_effect_grace(&self) -> Duration {
        Duration::from_millis(u64::from(self.continuous_effect_grace_ms))
    }

    /// Rejects configurations the room loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aura_tick_interval_ms == 0 {
            return Err(ConfigError::ZeroAuraInterval);
        }
        Ok(())
    }
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_server_cadence() {
        let config = BalanceConfig::default();
        assert_eq!(config.aura_tick_interval(), Duration::from_millis(200));
        assert_eq!(config.continuous_effect_grace(), Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = BalanceConfig::new().with_aura_tick_interval_ms(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroAuraInterval));
    }
}
