//! Board layout loader.
//!
//! Layouts are written as glyph rows, one string per board row.

use std::path::Path;

use battle_core::Board;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Board layout as stored in RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSpec {
    pub width: usize,
    pub rows: Vec<String>,
}

impl BoardSpec {
    /// Converts the glyph rows into a board, checking the declared width.
    pub fn build(&self) -> LoadResult<Board> {
        if let Some((row, line)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, line)| line.chars().count() != self.width)
        {
            anyhow::bail!(
                "Board row {} is {} tiles wide, expected {}",
                row,
                line.chars().count(),
                self.width
            );
        }
        Board::from_rows(self.rows.as_slice())
            .map_err(|e| anyhow::anyhow!("Invalid board layout: {}", e))
    }
}

impl From<&Board> for BoardSpec {
    fn from(board: &Board) -> Self {
        Self {
            width: board.width(),
            rows: board.layout_rows(),
        }
    }
}

/// Loader for board layouts from RON files.
pub struct BoardLoader;

impl BoardLoader {
    /// Load a board from a RON file containing a [`BoardSpec`].
    pub fn load(path: &Path) -> LoadResult<Board> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Board> {
        let spec: BoardSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse board RON: {}", e))?;
        spec.build()
    }
}
