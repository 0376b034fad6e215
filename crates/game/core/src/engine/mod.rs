//! Turn handling and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! binds host commands to seats, runs them through the transition phases,
//! checks the state invariants, and either commits the result and advances
//! the turn or restores the state exactly as it was.

mod errors;
mod hook;
mod setup;
mod transition;
mod turns;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use hook::{NoResolution, ResolutionHook};
pub use setup::{MatchStart, Seat, SetupError, new_match};

use crate::action::{Action, ActionResult, Command};
use crate::env::BattleEnv;
use crate::event::GameEvent;
use crate::invariants::check_invariants;
use crate::state::{GameState, PlayerId, PlayerIndex};

/// Complete outcome of processing one host command.
///
/// `events` always ends with an [`GameEvent::InputRequired`] naming the
/// player who must act next. A rejected command contributes no other events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReport {
    pub result: Result<ActionResult, ExecuteError>,
    pub events: Vec<GameEvent>,
}

impl ActionReport {
    pub fn is_accepted(&self) -> bool {
        self.result.is_ok()
    }
}

/// Game engine that validates and applies commands against a borrowed state.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Processes a command from the player identified by `player`.
    ///
    /// Never panics on host input: unknown players, out-of-turn commands and
    /// invalid payloads all come back as a rejected report with the state
    /// unchanged.
    pub fn execute(
        &mut self,
        env: BattleEnv<'_>,
        player: &PlayerId,
        command: Command,
    ) -> ActionReport {
        let mut events = Vec::new();
        let result = self
            .seat(player)
            .and_then(|actor| self.execute_action(&env, &command.into_action(actor), &mut events));
        if result.is_err() {
            events.clear();
        }
        events.push(GameEvent::InputRequired {
            player: self.state.current_player,
        });
        ActionReport { result, events }
    }

    /// Executes an already-bound action and advances the turn on success.
    ///
    /// On error the state is restored to what it was before the call and
    /// `events` may contain partial output the caller should discard.
    pub fn execute_action(
        &mut self,
        env: &BattleEnv<'_>,
        action: &Action,
        events: &mut Vec<GameEvent>,
    ) -> Result<ActionResult, ExecuteError> {
        self.validate_actor(action)?;

        let checkpoint = self.state.clone();
        let outcome = transition::execute_transition(action, self.state, env, events)
            .and_then(|result| self.verify().map(|()| result));

        match outcome {
            Ok(result) => {
                self.conclude_turn(env, &result);
                Ok(result)
            }
            Err(error) => {
                *self.state = checkpoint;
                Err(error)
            }
        }
    }

    fn seat(&self, player: &PlayerId) -> Result<PlayerIndex, ExecuteError> {
        self.state
            .seat_of(player)
            .ok_or_else(|| ExecuteError::UnknownPlayer(player.clone()))
    }

    /// Validates action actor matches turn state.
    fn validate_actor(&self, action: &Action) -> Result<(), ExecuteError> {
        let current = self.state.current_player;
        if action.actor != current {
            return Err(ExecuteError::NotCurrentPlayer {
                actor: action.actor,
                current,
            });
        }
        Ok(())
    }

    fn verify(&self) -> Result<(), ExecuteError> {
        let violations = check_invariants(self.state);
        if violations.is_empty() {
            return Ok(());
        }
        let message = violations
            .iter()
            .map(|violation| violation.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Err(ExecuteError::InvariantViolated(message))
    }
}
