//! Error types for action execution pipeline.

use crate::action::{EndTurnError, MoveError, SpawnError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{PlayerId, PlayerIndex};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("player {0} is not seated in this match")]
    UnknownPlayer(PlayerId),

    #[error("it is not {actor}'s turn (current: {current})")]
    NotCurrentPlayer {
        actor: PlayerIndex,
        current: PlayerIndex,
    },

    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("spawn action failed: {0}")]
    Spawn(TransitionPhaseError<SpawnError>),

    #[error("end turn action failed: {0}")]
    EndTurn(TransitionPhaseError<EndTurnError>),

    #[error("state invariants violated: {0}")]
    InvariantViolated(String),
}

impl ExecuteError {
    /// Pipeline phase that failed, for transition errors.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            ExecuteError::Move(error) => Some(error.phase),
            ExecuteError::Spawn(error) => Some(error.phase),
            ExecuteError::EndTurn(error) => Some(error.phase),
            _ => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::UnknownPlayer(_) => ErrorSeverity::Validation,
            ExecuteError::NotCurrentPlayer { .. } => ErrorSeverity::Recoverable,
            ExecuteError::Move(error) => error.error.severity(),
            ExecuteError::Spawn(error) => error.error.severity(),
            ExecuteError::EndTurn(error) => error.error.severity(),
            ExecuteError::InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::UnknownPlayer(_) => "EXECUTE_UNKNOWN_PLAYER",
            ExecuteError::NotCurrentPlayer { .. } => "EXECUTE_NOT_CURRENT_PLAYER",
            ExecuteError::Move(error) => error.error.error_code(),
            ExecuteError::Spawn(error) => error.error.error_code(),
            ExecuteError::EndTurn(error) => error.error.error_code(),
            ExecuteError::InvariantViolated(_) => "EXECUTE_INVARIANT_VIOLATED",
        }
    }
}
