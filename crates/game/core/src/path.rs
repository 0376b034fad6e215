//! Movement routes and reachability over a [`Board`].
//!
//! With movement capped at [`GameConfig::MAX_MOVEMENT`] the reference layout
//! admits at most one simple route between two tiles, so [`find_path`] is a
//! greedy walk instead of a general search. [`reachable_tiles`] is a bounded
//! breadth-first expansion used for highlighting legal destinations.
//!
//! [`GameConfig::MAX_MOVEMENT`]: crate::config::GameConfig::MAX_MOVEMENT
use std::collections::{BTreeSet, VecDeque};

use crate::board::{Board, TileIndex};

/// Greedy route from `from` to `to`, excluding `from` and including `to`.
///
/// Each step reduces the larger of the row/column deltas, preferring the row
/// on a tie. Returns an empty route when `from == to`, when either tile is off
/// the board, when the Manhattan distance exceeds `budget`, or when the walk
/// hits an unpathable tile. Occupancy is ignored.
pub fn find_path(board: &Board, from: TileIndex, to: TileIndex, budget: u32) -> Vec<TileIndex> {
    let Some(distance) = board.manhattan(from, to) else {
        return Vec::new();
    };
    if distance == 0 || distance > budget {
        return Vec::new();
    }
    let (Some((mut row, mut col)), Some((to_row, to_col))) = (board.row_col(from), board.row_col(to))
    else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity(distance as usize);
    while (row, col) != (to_row, to_col) {
        if row.abs_diff(to_row) >= col.abs_diff(to_col) {
            row = step_toward(row, to_row);
        } else {
            col = step_toward(col, to_col);
        }
        let next = TileIndex((row * board.width() + col) as i32);
        match board.tile(next) {
            Some(tile) if tile.is_pathable() => path.push(next),
            _ => return Vec::new(),
        }
    }
    path
}

/// Like [`find_path`], but rejects routes crossing or ending on an occupied
/// tile.
pub fn find_free_path(board: &Board, from: TileIndex, to: TileIndex, budget: u32) -> Vec<TileIndex> {
    let path = find_path(board, from, to, budget);
    if path.iter().any(|tile| board.occupant(*tile).is_some()) {
        return Vec::new();
    }
    path
}

/// Tiles a minion at `from` could walk to with `budget` steps.
///
/// Unpathable and occupied tiles are neither entered nor expanded through.
/// The origin is never part of the result.
pub fn reachable_tiles(board: &Board, from: TileIndex, budget: u32) -> BTreeSet<TileIndex> {
    let mut reached = BTreeSet::new();
    if budget == 0 || !board.contains(from) {
        return reached;
    }

    let mut frontier = VecDeque::from([(from, 0u32)]);
    while let Some((tile, spent)) = frontier.pop_front() {
        if spent == budget {
            continue;
        }
        for next in board.adjacent(tile) {
            if next == from || reached.contains(&next) {
                continue;
            }
            let open = board
                .tile(next)
                .is_some_and(|candidate| candidate.is_pathable() && !candidate.is_occupied());
            if open {
                reached.insert(next);
                frontier.push_back((next, spent + 1));
            }
        }
    }
    reached
}

fn step_toward(value: usize, target: usize) -> usize {
    if value < target { value + 1 } else { value - 1 }
}
