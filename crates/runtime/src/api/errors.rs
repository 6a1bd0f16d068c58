//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from team selection, battles, and roster bookkeeping so
//! clients can bubble them up with consistent context.
use thiserror::Error;

use game_core::{BattleError, CreatureError, ErrorSeverity, GameError, RosterError};

use crate::selection::SelectionError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Creature(#[from] CreatureError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("player team not set; call set_my_team first")]
    NoPlayerTeam,

    #[error("no enemy teams left in the tower")]
    NoEnemiesRemaining,

    #[error("failed to load {file}: {message}")]
    Content { file: &'static str, message: String },

    #[error("invalid tower configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Selection(e) => e.severity(),
            Self::Battle(e) => e.severity(),
            Self::Creature(e) => e.severity(),
            Self::Roster(e) => e.severity(),
            Self::NoPlayerTeam | Self::NoEnemiesRemaining => ErrorSeverity::Recoverable,
            Self::Content { .. } => ErrorSeverity::Fatal,
            Self::InvalidConfig { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Selection(e) => e.error_code(),
            Self::Battle(e) => e.error_code(),
            Self::Creature(e) => e.error_code(),
            Self::Roster(e) => e.error_code(),
            Self::NoPlayerTeam => "RUNTIME_NO_PLAYER_TEAM",
            Self::NoEnemiesRemaining => "RUNTIME_NO_ENEMIES",
            Self::Content { .. } => "RUNTIME_CONTENT",
            Self::InvalidConfig { .. } => "RUNTIME_INVALID_CONFIG",
        }
    }
}
