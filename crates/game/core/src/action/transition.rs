use crate::env::BattleEnv;
use crate::event::GameEvent;
use crate::state::GameState;

/// Defines how a concrete action variant mutates battle state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. Validation hooks
/// receive read-only state and must stay side-effect free; `apply` pushes the
/// events it produces onto `events`.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly. Implementations should
    /// assume that `pre_validate` has already run successfully.
    fn apply(
        &self,
        state: &mut GameState,
        env: &BattleEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
