//! Observer-facing events produced by processing actions.
//!
//! Events are returned per processed command rather than accumulated in the
//! state, so every report describes exactly one action.
use crate::board::TileIndex;
use crate::state::{MinionId, PlayerIndex, SpeciesId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum GameEvent {
    /// The named player is expected to act next.
    InputRequired { player: PlayerIndex },
    MinionSpawned { minion: MinionId, tile: TileIndex },
    /// One hop of a move; multi-tile moves produce one event per hop.
    MinionMoved {
        minion: MinionId,
        from: TileIndex,
        to: TileIndex,
    },
    MinionDied { minion: MinionId, tile: TileIndex },
    /// A graveyard template returned to its owner's bench.
    TemplateRecycled { player: PlayerIndex, species: SpeciesId },
}

impl GameEvent {
    pub fn is_input_required(&self) -> bool {
        matches!(self, GameEvent::InputRequired { .. })
    }
}
