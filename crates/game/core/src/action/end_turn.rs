use crate::action::ActionTransition;
use crate::env::BattleEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::event::GameEvent;
use crate::state::{GameState, PlayerIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndTurnError {
    #[error("there is no pending movement to end the turn on")]
    NothingPending,
}

impl GameError for EndTurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            EndTurnError::NothingPending => "END_TURN_NOTHING_PENDING",
        }
    }
}

/// Gives up the remaining movement of a multi-step move.
///
/// Turns otherwise end on their own after a spawn or move, so this is only
/// accepted while movement is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnAction {
    pub actor: PlayerIndex,
}

impl EndTurnAction {
    pub fn new(actor: PlayerIndex) -> Self {
        Self { actor }
    }
}

impl ActionTransition for EndTurnAction {
    type Error = EndTurnError;
    type Result = ();

    fn pre_validate(&self, state: &GameState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        state
            .phase
            .pending_minion()
            .map(|_| ())
            .ok_or(EndTurnError::NothingPending)
    }

    fn apply(
        &self,
        _state: &mut GameState,
        _env: &BattleEnv<'_>,
        _events: &mut Vec<GameEvent>,
    ) -> Result<Self::Result, Self::Error> {
        Ok(())
    }
}
