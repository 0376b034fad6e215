//! Player commands and their state transitions.
//!
//! # Module Structure
//!
//! - `transition`: the [`ActionTransition`] pipeline trait
//! - `movement`: moves and attack-moves, plus the route planning shared with spawns
//! - `spawn`: the transactional spawn-then-move command
//! - `end_turn`: explicit turn end for the multi-step movement variant
//!
//! A [`Command`] is what a host receives from a player; binding it to the seat
//! that sent it yields an [`Action`] the engine can execute.

mod end_turn;
mod movement;
mod spawn;
mod transition;

pub use end_turn::{EndTurnAction, EndTurnError};
pub use movement::{MoveAction, MoveError, MoveOutcome};
pub use spawn::{SpawnAction, SpawnError, SpawnOutcome};
pub use transition::ActionTransition;

use crate::board::TileIndex;
use crate::state::PlayerIndex;

/// Player intent as delivered by the host, before the actor is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Move {
        from: TileIndex,
        to: TileIndex,
    },
    Spawn {
        bench_index: i32,
        spawn_point: TileIndex,
        move_to: TileIndex,
    },
    EndTurn,
}

impl Command {
    /// Binds the command to the seat that issued it.
    pub fn into_action(self, actor: PlayerIndex) -> Action {
        let kind = match self {
            Command::Move { from, to } => ActionKind::Move(MoveAction::new(actor, from, to)),
            Command::Spawn {
                bench_index,
                spawn_point,
                move_to,
            } => ActionKind::Spawn(SpawnAction::new(actor, bench_index, spawn_point, move_to)),
            Command::EndTurn => ActionKind::EndTurn(EndTurnAction::new(actor)),
        };
        Action { actor, kind }
    }

    /// Returns the snake_case name hosts use for this command.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Command::Move { .. } => "move",
            Command::Spawn { .. } => "spawn",
            Command::EndTurn => "end_turn",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Move(MoveAction),
    Spawn(SpawnAction),
    EndTurn(EndTurnAction),
}

/// A command bound to the acting seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub actor: PlayerIndex,
    pub kind: ActionKind,
}

/// Action-specific result of a successful execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Move(MoveOutcome),
    Spawn(SpawnOutcome),
    EndTurn,
}
