//! Common error infrastructure for perk-core.
//!
//! The four combat entry points are infallible: malformed runtime data
//! degrades to "no special effect". Errors only surface while authoring data
//! (catalog rows, balance config) and from the hosting simulation's own
//! bookkeeping.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: perk percentage above 1.0, duplicate catalog row
    Validation,

    /// The battle cannot continue with this data.
    ///
    /// Examples: zero aura interval, missing built-in catalog
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the error aborts battle setup.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all combat-side errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Rejections produced while validating a perk definition or catalog row.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PerkError {
    #[error("perk id must not be empty")]
    EmptyId,

    #[error("perk '{perk}': {field} = {value} is outside [0, 1]")]
    PercentOutOfRange {
        perk: String,
        field: &'static str,
        value: f32,
    },

    #[error("perk '{perk}': {field} = {value} is not a finite, non-negative distance")]
    InvalidRadius {
        perk: String,
        field: &'static str,
        value: f32,
    },

    #[error("perk '{perk}': nth must be at least 1")]
    ZeroNth { perk: String },

    #[error("perk '{perk}': duration_ms must be positive")]
    ZeroDuration { perk: String },

    #[error("unit '{unit}' lists perk '{perk}' more than once")]
    DuplicatePerk { unit: String, perk: String },
}

impl CombatError for PerkError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use PerkError::*;
        match self {
            EmptyId => "PERK_EMPTY_ID",
            PercentOutOfRange { .. } => "PERK_PERCENT_OUT_OF_RANGE",
            InvalidRadius { .. } => "PERK_INVALID_RADIUS",
            ZeroNth { .. } => "PERK_ZERO_NTH",
            ZeroDuration { .. } => "PERK_ZERO_DURATION",
            DuplicatePerk { .. } => "PERK_DUPLICATE",
        }
    }
}

/// Rejections produced while validating [`crate::BalanceConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("aura tick interval must be positive")]
    ZeroAuraInterval,
}

impl CombatError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroAuraInterval => "CONFIG_ZERO_AURA_INTERVAL",
        }
    }
}
