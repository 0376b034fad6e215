//! Content loaders for reading battle data from files.
//!
//! Every loader offers `load(path)` for files on disk and `parse(text)` for
//! already-read content, so the embedded defaults go through the same code.

pub mod board;
pub mod config;
pub mod decks;
pub mod factory;
pub mod species;

pub use board::{BoardLoader, BoardSpec};
pub use config::ConfigLoader;
pub use decks::DeckLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use species::{SpeciesCatalog, SpeciesLoader, SpeciesSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
