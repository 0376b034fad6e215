//! Host-facing action names and JSON payloads.
//!
//! Payload field names follow the host protocol (`benchIndex`, `spawnPoint`,
//! `moveTo`); decoding turns them into core [`Command`]s.
use battle_core::{Command, TileIndex};
use serde::{Deserialize, Serialize};

use super::errors::{Result, RuntimeError};

/// Action types a host can submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ActionType {
    Move,
    Spawn,
    EndTurn,
}

impl ActionType {
    pub fn parse(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| RuntimeError::UnknownAction(name.to_owned()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Move => "move",
            ActionType::Spawn => "spawn",
            ActionType::EndTurn => "end_turn",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePayload {
    pub from: TileIndex,
    pub to: TileIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnPayload {
    pub bench_index: i32,
    pub spawn_point: TileIndex,
    pub move_to: TileIndex,
}

/// `end_turn` carries no data; unknown fields are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndTurnPayload {}

impl From<MovePayload> for Command {
    fn from(payload: MovePayload) -> Self {
        Command::Move {
            from: payload.from,
            to: payload.to,
        }
    }
}

impl From<SpawnPayload> for Command {
    fn from(payload: SpawnPayload) -> Self {
        Command::Spawn {
            bench_index: payload.bench_index,
            spawn_point: payload.spawn_point,
            move_to: payload.move_to,
        }
    }
}

impl From<EndTurnPayload> for Command {
    fn from(_: EndTurnPayload) -> Self {
        Command::EndTurn
    }
}

/// Decodes a host action into a core command.
pub fn decode_command(action: ActionType, payload: &str) -> Result<Command> {
    let malformed = |source| RuntimeError::MalformedPayload {
        action: action.as_str(),
        source,
    };
    let command = match action {
        ActionType::Move => serde_json::from_str::<MovePayload>(payload)
            .map_err(malformed)?
            .into(),
        ActionType::Spawn => serde_json::from_str::<SpawnPayload>(payload)
            .map_err(malformed)?
            .into(),
        ActionType::EndTurn => {
            if payload.trim().is_empty() {
                Command::EndTurn
            } else {
                serde_json::from_str::<EndTurnPayload>(payload)
                    .map_err(malformed)?
                    .into()
            }
        }
    };
    Ok(command)
}
