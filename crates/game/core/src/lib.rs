//! Deterministic battle rules shared by every host.
//!
//! `battle-core` defines the canonical rules (board, minions, economy, turns
//! and the action processor) and exposes pure APIs that the runtime, the CLI
//! and offline tools reuse. All state mutation flows through
//! [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod invariants;
pub mod path;
pub mod state;

pub use action::{
    Action, ActionKind, ActionResult, ActionTransition, Command, EndTurnAction, EndTurnError,
    MoveAction, MoveError, MoveOutcome, SpawnAction, SpawnError, SpawnOutcome,
};
pub use board::{Board, BoardError, REFERENCE_LAYOUT, Tile, TileIndex, TileKind, TileSpec};
pub use config::GameConfig;
pub use engine::{
    ActionReport, ExecuteError, GameEngine, MatchStart, NoResolution, ResolutionHook, Seat,
    SetupError, TransitionPhase, TransitionPhaseError, new_match,
};
pub use env::{BattleEnv, SpeciesOracle};
pub use error::{ErrorSeverity, GameError};
pub use event::GameEvent;
pub use invariants::{InvariantViolation, check_invariants};
pub use path::{find_free_path, find_path, reachable_tiles};
pub use state::{
    Bench, Deck, GameState, Graveyard, KillOutcome, Minion, MinionId, MinionRegistry,
    MinionTemplate, Phase, PlayerId, PlayerIndex, PlayerState, SpeciesId, StateError,
};
