//! State management errors.
//!
//! Errors related to the minion registry, tile occupancy and the per-player
//! bounded queues.

use crate::board::{BoardError, TileIndex, TileKind};
use crate::error::{ErrorSeverity, GameError};

use super::{MinionId, PlayerIndex};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("bench slot {index} is empty (bench holds {len})")]
    BenchSlotEmpty { index: usize, len: usize },

    #[error("bench of {0} is full")]
    BenchFull(PlayerIndex),

    #[error("graveyard slot {index} is empty (graveyard holds {len})")]
    GraveyardSlotEmpty { index: usize, len: usize },

    #[error("graveyard of {0} is full")]
    GraveyardFull(PlayerIndex),

    #[error("{player} cannot afford cost {cost} with {available} resources")]
    InsufficientResources {
        player: PlayerIndex,
        cost: u32,
        available: u32,
    },

    #[error("tile {0} is out of bounds")]
    TileOutOfBounds(TileIndex),

    #[error("tile {tile} is a {kind} tile, not a spawn point")]
    NotASpawnPoint { tile: TileIndex, kind: TileKind },

    #[error("spawn point {tile} does not belong to {player}")]
    SpawnPointNotOwned { tile: TileIndex, player: PlayerIndex },

    #[error("tile {0} is unpathable")]
    Unpathable(TileIndex),

    #[error("tile {tile} is occupied by {occupant}")]
    TileOccupied { tile: TileIndex, occupant: MinionId },

    #[error("minion {0} is not on the battlefield")]
    UnknownMinion(MinionId),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("state encoding failed: {0}")]
    Encoding(String),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            BenchSlotEmpty { .. } | GraveyardSlotEmpty { .. } | TileOutOfBounds(_) => {
                ErrorSeverity::Validation
            }
            NotASpawnPoint { .. } | SpawnPointNotOwned { .. } | Unpathable(_) => {
                ErrorSeverity::Validation
            }
            BenchFull(_) | GraveyardFull(_) | InsufficientResources { .. } => {
                ErrorSeverity::Recoverable
            }
            TileOccupied { .. } => ErrorSeverity::Recoverable,
            UnknownMinion(_) | Board(_) => ErrorSeverity::Internal,
            Encoding(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            BenchSlotEmpty { .. } => "STATE_BENCH_SLOT_EMPTY",
            BenchFull(_) => "STATE_BENCH_FULL",
            GraveyardSlotEmpty { .. } => "STATE_GRAVEYARD_SLOT_EMPTY",
            GraveyardFull(_) => "STATE_GRAVEYARD_FULL",
            InsufficientResources { .. } => "STATE_INSUFFICIENT_RESOURCES",
            TileOutOfBounds(_) => "STATE_TILE_OUT_OF_BOUNDS",
            NotASpawnPoint { .. } => "STATE_NOT_A_SPAWN_POINT",
            SpawnPointNotOwned { .. } => "STATE_SPAWN_POINT_NOT_OWNED",
            Unpathable(_) => "STATE_UNPATHABLE",
            TileOccupied { .. } => "STATE_TILE_OCCUPIED",
            UnknownMinion(_) => "STATE_UNKNOWN_MINION",
            Board(_) => "STATE_BOARD_DESYNC",
            Encoding(_) => "STATE_ENCODING",
        }
    }
}
