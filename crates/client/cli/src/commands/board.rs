//! `board` subcommand.

use std::path::PathBuf;

use anyhow::Result;
use battle_core::{Board, TileKind};

pub(crate) fn run(content: Option<PathBuf>) -> Result<()> {
    let bundle = super::load_content(content)?;
    for line in render(&bundle.board) {
        println!("{line}");
    }
    Ok(())
}

/// Layout rows followed by one line per non-normal tile.
pub(crate) fn render(board: &Board) -> Vec<String> {
    let mut lines = board.layout_rows();
    lines.push(String::new());
    for tile in board.iter().filter(|tile| tile.kind != TileKind::Normal) {
        let line = match tile.owner {
            Some(owner) => format!("{:>3}  {} ({owner})", tile.index.0, tile.kind),
            None => format!("{:>3}  {}", tile.index.0, tile.kind),
        };
        lines.push(line);
    }
    lines
}
