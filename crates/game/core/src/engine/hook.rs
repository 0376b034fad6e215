//! Extension points the rules leave open to the host.
//!
//! Combat between opposing minions and the turn-timer expiry have no built-in
//! effect. A host plugs behaviour in by implementing [`ResolutionHook`]; the
//! engine still runs its invariant checks after a hook mutates the state.

use crate::event::GameEvent;
use crate::state::{GameState, MinionId};

pub trait ResolutionHook {
    /// Called after `attacker` stopped next to `defender` at the end of an
    /// attack-move. Returned events are appended to the action's events.
    fn resolve_engagement(
        &self,
        _state: &mut GameState,
        _attacker: MinionId,
        _defender: MinionId,
    ) -> Vec<GameEvent> {
        Vec::new()
    }

    /// Called when the turn timer reaches zero, before it is reset.
    fn on_timer_expired(&self, _state: &mut GameState) -> Vec<GameEvent> {
        Vec::new()
    }
}

/// Leaves engagements and timer expiry without effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResolution;

impl ResolutionHook for NoResolution {}
