//! Species catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use battle_core::{GameConfig, MinionTemplate, SpeciesId, SpeciesOracle};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One catalog entry as stored in RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesSpec {
    pub species: SpeciesId,
    pub name: String,
    pub power: i32,
    pub health: i32,
    pub movement: u8,
    pub cost: u32,
}

impl SpeciesSpec {
    pub fn template(&self) -> MinionTemplate {
        MinionTemplate {
            species: self.species,
            power: self.power,
            health: self.health,
            movement: self.movement,
            cost: self.cost,
        }
    }
}

/// Species stat blocks keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesCatalog {
    entries: BTreeMap<SpeciesId, SpeciesSpec>,
}

impl SpeciesCatalog {
    /// Builds a catalog, rejecting duplicate ids and out-of-range stats.
    pub fn from_specs(specs: impl IntoIterator<Item = SpeciesSpec>) -> LoadResult<Self> {
        let mut entries = BTreeMap::new();
        for spec in specs {
            if spec.movement > GameConfig::MAX_MOVEMENT {
                anyhow::bail!(
                    "Species '{}' has movement {}, the limit is {}",
                    spec.name,
                    spec.movement,
                    GameConfig::MAX_MOVEMENT
                );
            }
            if spec.health <= 0 {
                anyhow::bail!("Species '{}' must have positive health", spec.name);
            }
            let id = spec.species;
            if let Some(previous) = entries.insert(id, spec) {
                anyhow::bail!("Duplicate species id {} ('{}')", id, previous.name);
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, species: SpeciesId) -> Option<&SpeciesSpec> {
        self.entries.get(&species)
    }

    pub fn name(&self, species: SpeciesId) -> Option<&str> {
        self.get(species).map(|spec| spec.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesSpec> {
        self.entries.values()
    }
}

impl SpeciesOracle for SpeciesCatalog {
    fn template(&self, species: SpeciesId) -> Option<MinionTemplate> {
        self.get(species).map(SpeciesSpec::template)
    }
}

/// Loader for the species catalog from RON files.
pub struct SpeciesLoader;

impl SpeciesLoader {
    /// Load a catalog from a RON file containing `Vec<SpeciesSpec>`.
    pub fn load(path: &Path) -> LoadResult<SpeciesCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpeciesCatalog> {
        let specs: Vec<SpeciesSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species RON: {}", e))?;
        SpeciesCatalog::from_specs(specs)
    }
}
