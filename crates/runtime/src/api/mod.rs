//! Public runtime API surface.
//!
//! This module gathers the types exposed to hosts so the session can stay
//! focused on orchestration.

pub mod errors;
pub mod payload;

pub use errors::{Result, RuntimeError};
pub use payload::{ActionType, EndTurnPayload, MovePayload, SpawnPayload, decode_command};
