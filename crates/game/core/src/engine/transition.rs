//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionKind, ActionResult, ActionTransition};
use crate::env::BattleEnv;
use crate::event::GameEvent;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &BattleEnv<'_>,
    events: &mut Vec<GameEvent>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env, events)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action type to its transition and wraps the result in
/// [`ActionResult`].
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &BattleEnv<'_>,
    events: &mut Vec<GameEvent>,
) -> Result<ActionResult, ExecuteError> {
    match &action.kind {
        ActionKind::Move(transition) => drive_transition(transition, state, env, events)
            .map(ActionResult::Move)
            .map_err(ExecuteError::Move),
        ActionKind::Spawn(transition) => drive_transition(transition, state, env, events)
            .map(ActionResult::Spawn)
            .map_err(ExecuteError::Spawn),
        ActionKind::EndTurn(transition) => {
            drive_transition(transition, state, env, events).map_err(ExecuteError::EndTurn)?;
            Ok(ActionResult::EndTurn)
        }
    }
}
