//! Structural invariants of the battle state.
//!
//! These should never trigger in a correctly implemented engine; the engine
//! runs them after every transition and refuses to commit a state that fails.

use std::collections::BTreeSet;

use crate::state::GameState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all state invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen = BTreeSet::new();

    // Every occupied tile points at a live minion standing on it.
    for tile in state.board.iter() {
        let Some(uid) = tile.occupant else {
            continue;
        };
        if !seen.insert(uid) {
            violations.push(InvariantViolation {
                message: format!("Minion {uid} occupies more than one tile"),
            });
        }
        match state.minions.get(uid) {
            None => violations.push(InvariantViolation {
                message: format!("Tile {} references missing minion {uid}", tile.index),
            }),
            Some(minion) if minion.position != tile.index => violations.push(InvariantViolation {
                message: format!(
                    "Tile {} holds {uid} but the minion records position {}",
                    tile.index, minion.position
                ),
            }),
            Some(_) => {}
        }
    }

    // Every live minion is on the board.
    let next_id = state.minions.next_id();
    for minion in state.minions.iter() {
        if !seen.contains(&minion.uid) {
            violations.push(InvariantViolation {
                message: format!(
                    "Minion {} is registered at {} but no tile holds it",
                    minion.uid, minion.position
                ),
            });
        }
        if minion.uid >= next_id {
            violations.push(InvariantViolation {
                message: format!(
                    "Minion {} was never handed out by the allocator (next is {next_id})",
                    minion.uid
                ),
            });
        }
    }

    violations
}
