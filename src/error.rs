//! Error types.
//!
//! In-game failures (no target, missing skill, ...) are not errors: they
//! come back as an unsuccessful [`ActionResult`](crate::core::ActionResult).
//! The types here cover the two things that genuinely go wrong:
//! malformed data files and misuse of the battle API.

use thiserror::Error;

use crate::core::{CharacterId, Side};

/// Errors raised while loading templates or configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown character template '{0}'")]
    UnknownTemplate(String),

    #[error("invalid template '{key}': {reason}")]
    InvalidTemplate { key: String, reason: String },
}

/// Errors raised when the battle API is driven out of order.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("battle has already started")]
    AlreadyStarted,

    #[error("battle has not started yet")]
    NotStarted,

    #[error("battle is over")]
    BattleOver,

    #[error("battle is not waiting for player input")]
    NotAwaitingInput,

    #[error("it is {expected}'s turn, not {actual}'s")]
    WrongActor {
        expected: CharacterId,
        actual: CharacterId,
    },

    #[error("player-controlled character {0} needs an action")]
    NeedsInput(CharacterId),

    #[error("{0} has no members")]
    EmptyTeam(Side),

    #[error("character id {0} is used more than once")]
    DuplicateCharacter(CharacterId),
}
