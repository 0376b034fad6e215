//! `replay` subcommand.
//!
//! A script is a JSON array of steps. Action steps name the acting player,
//! the host action type and its payload; tick steps advance the turn timer:
//!
//! ```json
//! [
//!   { "player": "1", "action": "spawn", "payload": { "benchIndex": 0, "spawnPoint": 0, "moveTo": 1 } },
//!   { "tick": 5 },
//!   { "player": "2", "action": "end_turn" }
//! ]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use battle_core::{GameError, PlayerId};
use battle_runtime::BattleSession;
use serde::Deserialize;

const PLAYER_ONE: &str = "1";
const PLAYER_TWO: &str = "2";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub(crate) enum Step {
    Tick {
        tick: u32,
    },
    Action {
        player: String,
        action: String,
        #[serde(default = "empty_payload")]
        payload: serde_json::Value,
    },
}

fn empty_payload() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

pub(crate) fn run(script: &Path, content: Option<PathBuf>) -> Result<()> {
    let steps = load_script(script)?;
    let mut session = start(content)?;
    tracing::info!(steps = steps.len(), script = %script.display(), "replaying script");

    for line in replay(&mut session, &steps)? {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn load_script(path: &Path) -> Result<Vec<Step>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Seats players "1" and "2" with decks 1 and 2.
fn start(content: Option<PathBuf>) -> Result<BattleSession> {
    let bundle = super::load_content(content)?;
    let seats = [
        BattleSession::seat(&bundle, PlayerId::new(PLAYER_ONE), 1)?,
        BattleSession::seat(&bundle, PlayerId::new(PLAYER_TWO), 2)?,
    ];
    Ok(BattleSession::setup(&bundle, seats)?)
}

/// Runs every step and returns the transcript, ending with the state root.
pub(crate) fn replay(session: &mut BattleSession, steps: &[Step]) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for event in session.events() {
        lines.push(format!("  {}", serde_json::to_string(event)?));
    }

    for (number, step) in steps.iter().enumerate() {
        match step {
            Step::Tick { tick } => {
                for _ in 0..*tick {
                    for event in session.on_tick() {
                        lines.push(format!("  {}", serde_json::to_string(&event)?));
                    }
                }
                lines.push(format!(
                    "#{number} tick x{tick} -> timer {}",
                    session.state().timer_seconds
                ));
            }
            Step::Action {
                player,
                action,
                payload,
            } => {
                let accepted = session
                    .handle(action, &payload.to_string(), &PlayerId::new(player.as_str()))
                    .with_context(|| format!("step #{number} ({action} by {player})"))?;
                let verdict = match (accepted, session.last_error()) {
                    (true, _) => "accepted".to_owned(),
                    (false, Some(error)) => format!("rejected {}", error.error_code()),
                    (false, None) => "rejected".to_owned(),
                };
                lines.push(format!("#{number} {player} {action} -> {verdict}"));
                for event in session.events() {
                    lines.push(format!("  {}", serde_json::to_string(event)?));
                }
            }
        }
    }

    lines.push(format!("state root: {}", session.state_root_hex()?));
    Ok(lines)
}
