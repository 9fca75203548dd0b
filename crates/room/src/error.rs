use perk_core::{CombatError, ConfigError, ErrorSeverity, UnitId};

/// Errors from room bookkeeping. The perk entry points themselves never fail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("unit {0} is not in this room")]
    UnknownUnit(UnitId),

    #[error("unit {0} is already deployed")]
    DuplicateUnit(UnitId),

    #[error("unit {0} is dead")]
    UnitDead(UnitId),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CombatError for RoomError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownUnit(_) | Self::DuplicateUnit(_) | Self::UnitDead(_) => {
                ErrorSeverity::Validation
            }
            Self::Config(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownUnit(_) => "ROOM_UNKNOWN_UNIT",
            Self::DuplicateUnit(_) => "ROOM_DUPLICATE_UNIT",
            Self::UnitDead(_) => "ROOM_UNIT_DEAD",
            Self::Config(inner) => inner.error_code(),
        }
    }
}
