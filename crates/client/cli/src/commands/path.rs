//! `path` and `reach` subcommands.

use std::path::PathBuf;

use anyhow::{Result, ensure};
use battle_core::{Board, TileIndex, find_free_path, find_path, reachable_tiles};

pub(crate) fn run_path(content: Option<PathBuf>, from: i32, to: i32, budget: u32) -> Result<()> {
    let bundle = super::load_content(content)?;
    let board = &bundle.board;
    let (from, to) = (TileIndex(from), TileIndex(to));
    ensure!(board.contains(from), "tile {from} is not on the board");
    ensure!(board.contains(to), "tile {to} is not on the board");

    println!("greedy: {}", join(&find_path(board, from, to, budget)));
    println!("free:   {}", join(&find_free_path(board, from, to, budget)));
    Ok(())
}

pub(crate) fn run_reach(content: Option<PathBuf>, from: i32, budget: u32) -> Result<()> {
    let bundle = super::load_content(content)?;
    let from = TileIndex(from);
    ensure!(bundle.board.contains(from), "tile {from} is not on the board");

    let reach: Vec<_> = reachable_tiles(&bundle.board, from, budget).into_iter().collect();
    println!("{}", join(&reach));
    for line in overlay(&bundle.board, from, &reach) {
        println!("{line}");
    }
    Ok(())
}

fn join(tiles: &[TileIndex]) -> String {
    if tiles.is_empty() {
        return "-".to_owned();
    }
    tiles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Layout with the origin as `@` and reachable tiles as `*`.
fn overlay(board: &Board, from: TileIndex, reach: &[TileIndex]) -> Vec<String> {
    board
        .layout_rows()
        .into_iter()
        .enumerate()
        .map(|(row, glyphs)| {
            glyphs
                .chars()
                .enumerate()
                .map(|(col, glyph)| {
                    let index = TileIndex((row * board.width() + col) as i32);
                    if index == from {
                        '@'
                    } else if reach.contains(&index) {
                        '*'
                    } else {
                        glyph
                    }
                })
                .collect()
        })
        .collect()
}
