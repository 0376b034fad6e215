//! Content factory for building a match's static data.

use std::path::{Path, PathBuf};

use battle_core::{Board, Deck, GameConfig};

use crate::loaders::{
    BoardLoader, ConfigLoader, DeckLoader, LoadResult, SpeciesCatalog, SpeciesLoader,
};

const BUILTIN_CONFIG: &str = include_str!("../../data/config.toml");
const BUILTIN_BOARD: &str = include_str!("../../data/board.ron");
const BUILTIN_SPECIES: &str = include_str!("../../data/species.ron");
const BUILTIN_DECKS: &str = include_str!("../../data/decks.ron");

/// Everything a host needs to set up a match.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub board: Board,
    pub catalog: SpeciesCatalog,
    pub decks: Vec<Deck>,
}

impl ContentBundle {
    pub fn deck(&self, id: u32) -> Option<&Deck> {
        self.decks.iter().find(|deck| deck.id == id)
    }
}

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── board.ron
/// ├── species.ron
/// └── decks.ron
/// ```
///
/// [`ContentFactory::builtin`] reads the same files compiled into the crate.
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Creates a factory serving the content shipped with the crate.
    pub fn builtin() -> Self {
        Self { data_dir: None }
    }

    /// Load match rules from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        match &self.data_dir {
            Some(dir) => ConfigLoader::load(&dir.join("config.toml")),
            None => ConfigLoader::parse(BUILTIN_CONFIG),
        }
    }

    /// Load the board layout from `board.ron`.
    pub fn load_board(&self) -> LoadResult<Board> {
        match &self.data_dir {
            Some(dir) => BoardLoader::load(&dir.join("board.ron")),
            None => BoardLoader::parse(BUILTIN_BOARD),
        }
    }

    /// Load the species catalog from `species.ron`.
    pub fn load_species(&self) -> LoadResult<SpeciesCatalog> {
        match &self.data_dir {
            Some(dir) => SpeciesLoader::load(&dir.join("species.ron")),
            None => SpeciesLoader::parse(BUILTIN_SPECIES),
        }
    }

    /// Load deck lists from `decks.ron`.
    pub fn load_decks(&self) -> LoadResult<Vec<Deck>> {
        match &self.data_dir {
            Some(dir) => DeckLoader::load(&dir.join("decks.ron")),
            None => DeckLoader::parse(BUILTIN_DECKS),
        }
    }

    /// Load every file and check that decks only list known species.
    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle {
            config: self.load_config()?,
            board: self.load_board()?,
            catalog: self.load_species()?,
            decks: self.load_decks()?,
        };

        for deck in &bundle.decks {
            if let Some(unknown) = deck
                .minions
                .iter()
                .find(|species| bundle.catalog.get(**species).is_none())
            {
                anyhow::bail!("Deck {} lists unknown {}", deck.id, unknown);
            }
        }
        Ok(bundle)
    }

    /// Returns the data directory path, or `None` for builtin content.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }
}
