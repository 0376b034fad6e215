//! Host adapter for the deterministic battle rules.
//!
//! This crate wires content loading, payload decoding and structured logging
//! around [`battle_core::GameEngine`]. Hosts embed a [`BattleSession`] per
//! match and forward their lifecycle callbacks to it.
//!
//! Modules are organized by responsibility:
//! - [`session`] owns the match state and dispatches host actions
//! - [`api`] exposes the payload and error types hosts interact with
//! - [`config`] resolves content and rule overrides from the environment
pub mod api;
pub mod config;
pub mod session;

pub use api::{
    ActionType, EndTurnPayload, MovePayload, Result, RuntimeError, SpawnPayload, decode_command,
};
pub use config::RuntimeConfig;
pub use session::BattleSession;
