use crate::MatchAction;
use game_core::{MatchPhase, UnknownDifficulty};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("cannot {action:?} while {phase:?}")]
    InvalidTransition {
        phase: MatchPhase,
        action: MatchAction,
    },

    #[error("codec error: {0}")]
    Codec(#[from] postcard::Error),

    #[error("unknown difficulty index {0}")]
    DifficultyIndex(u8),

    #[error(transparent)]
    Difficulty(#[from] UnknownDifficulty),
}

pub type Result<T> = std::result::Result<T, HostError>;
