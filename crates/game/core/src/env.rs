//! Read-only collaborators the engine consults while processing actions.
//!
//! [`SpeciesOracle`] resolves deck entries into stat blocks at setup time;
//! [`BattleEnv`] bundles the rules configuration with the resolution hook so
//! transitions can reach both without hard coupling to concrete content.
use crate::config::GameConfig;
use crate::engine::{NoResolution, ResolutionHook};
use crate::state::{MinionTemplate, SpeciesId};

/// Source of species stat blocks.
pub trait SpeciesOracle {
    fn template(&self, species: SpeciesId) -> Option<MinionTemplate>;
}

impl<const N: usize> SpeciesOracle for [MinionTemplate; N] {
    fn template(&self, species: SpeciesId) -> Option<MinionTemplate> {
        self.iter().copied().find(|template| template.species == species)
    }
}

impl SpeciesOracle for Vec<MinionTemplate> {
    fn template(&self, species: SpeciesId) -> Option<MinionTemplate> {
        self.iter().copied().find(|template| template.species == species)
    }
}

static NO_RESOLUTION: NoResolution = NoResolution;

#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    config: &'a GameConfig,
    hook: &'a dyn ResolutionHook,
}

impl<'a> BattleEnv<'a> {
    /// Environment with the default no-op resolution hook.
    pub fn new(config: &'a GameConfig) -> Self {
        Self {
            config,
            hook: &NO_RESOLUTION,
        }
    }

    #[must_use]
    pub fn with_hook(mut self, hook: &'a dyn ResolutionHook) -> Self {
        self.hook = hook;
        self
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn hook(&self) -> &'a dyn ResolutionHook {
        self.hook
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
