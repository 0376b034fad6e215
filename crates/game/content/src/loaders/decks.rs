//! Deck list loader.

use std::collections::BTreeSet;
use std::path::Path;

use battle_core::{Deck, GameConfig};

use crate::loaders::{LoadResult, read_file};

/// Loader for deck lists from RON files.
pub struct DeckLoader;

impl DeckLoader {
    /// Load decks from a RON file containing `Vec<Deck>`.
    pub fn load(path: &Path) -> LoadResult<Vec<Deck>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse decks, rejecting duplicate ids and decks the bench cannot hold.
    pub fn parse(content: &str) -> LoadResult<Vec<Deck>> {
        let decks: Vec<Deck> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse deck RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for deck in &decks {
            if !seen.insert(deck.id) {
                anyhow::bail!("Duplicate deck id {}", deck.id);
            }
            if deck.minions.len() > GameConfig::MAX_BENCH_SIZE {
                anyhow::bail!(
                    "Deck {} lists {} minions, the bench holds {}",
                    deck.id,
                    deck.minions.len(),
                    GameConfig::MAX_BENCH_SIZE
                );
            }
        }
        Ok(decks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::SpeciesId;

    #[test]
    fn parses_decks_in_order() {
        let decks = DeckLoader::parse("[(id: 9, minions: [3, 1])]").unwrap();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].minions, vec![SpeciesId(3), SpeciesId(1)]);
    }

    #[test]
    fn rejects_oversized_and_duplicate_decks() {
        assert!(DeckLoader::parse("[(id: 1, minions: [1, 1, 1, 1, 1, 1, 1])]").is_err());
        assert!(DeckLoader::parse("[(id: 1, minions: []), (id: 1, minions: [])]").is_err());
    }
}
