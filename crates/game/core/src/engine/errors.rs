//! Error types for battle resolution.

use crate::creature::CreatureError;
use crate::error::{ErrorSeverity, GameError};
use crate::roster::RosterError;

use super::Side;

/// Errors surfaced while running a battle.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BattleError {
    #[error("roster operation failed: {0}")]
    Roster(#[from] RosterError),

    #[error("creature update failed: {0}")]
    Creature(#[from] CreatureError),

    #[error("{side} has no active creature")]
    NoActiveCreature { side: Side },

    #[error("battle already finished")]
    AlreadyFinished,

    #[error("battle has not finished yet")]
    NotFinished,
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Roster(e) => e.severity(),
            Self::Creature(e) => e.severity(),
            Self::NoActiveCreature { .. } | Self::AlreadyFinished | Self::NotFinished => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Roster(e) => e.error_code(),
            Self::Creature(e) => e.error_code(),
            Self::NoActiveCreature { .. } => "BATTLE_NO_ACTIVE_CREATURE",
            Self::AlreadyFinished => "BATTLE_ALREADY_FINISHED",
            Self::NotFinished => "BATTLE_NOT_FINISHED",
        }
    }
}
