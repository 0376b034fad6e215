//! Data-driven battle content and its loaders.
//!
//! This crate houses the static content a match is built from and provides
//! loaders for RON/TOML data files:
//! - Board layouts (glyph rows via RON)
//! - Species stat blocks (via RON)
//! - Deck lists (via RON)
//! - Match rules (via TOML)
//!
//! Content is consumed when a match is set up and never appears in game state
//! beyond the templates copied onto the benches.
//!
//! All loaders use battle-core types directly with serde for RON/TOML
//! deserialization. The default content ships inside the crate, see
//! [`ContentFactory::builtin`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BoardLoader, BoardSpec, ConfigLoader, ContentBundle, ContentFactory, DeckLoader, LoadResult,
    SpeciesCatalog, SpeciesLoader, SpeciesSpec,
};
