//! Unified error types surfaced by the runtime API.
//!
//! Rule violations are not errors at this level: a rejected action is reported
//! as `Ok(false)`. These variants cover malformed host input and setup
//! failures the host has to deal with.
use battle_core::{PlayerId, SetupError, StateError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unknown action type '{0}'")]
    UnknownAction(String),

    #[error("malformed {action} payload")]
    MalformedPayload {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load battle content: {0}")]
    Content(String),

    #[error("deck {deck} requested by player {player} does not exist")]
    UnknownDeck { player: PlayerId, deck: u32 },

    #[error("failed to set up the match")]
    Setup(#[from] SetupError),

    #[error("failed to hash the battle state")]
    StateRoot(#[from] StateError),
}
