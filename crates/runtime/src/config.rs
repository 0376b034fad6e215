//! Runtime configuration structures and loaders.

use std::env;
use std::path::PathBuf;

use battle_content::{ContentBundle, ContentFactory};

use crate::api::{Result, RuntimeError};

/// Where match content comes from and which rules to override.
///
/// Overrides are applied on top of the content's `config.toml`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Content directory; the builtin content is used when unset.
    pub content_dir: Option<PathBuf>,
    pub turn_seconds: Option<u32>,
    pub continued_movement: Option<bool>,
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONTENT_DIR` - Content directory (default: builtin content)
    /// - `BATTLE_TURN_SECONDS` - Turn timer length in seconds
    /// - `BATTLE_CONTINUED_MOVEMENT` - Enable the multi-step movement variant
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("BATTLE_CONTENT_DIR") {
            config.content_dir = Some(dir);
        }
        if let Some(seconds) = read_env::<u32>("BATTLE_TURN_SECONDS") {
            config.turn_seconds = Some(seconds.max(1));
        }
        if let Some(enabled) = read_env_bool("BATTLE_CONTINUED_MOVEMENT") {
            config.continued_movement = Some(enabled);
        }

        config
    }

    #[must_use]
    pub fn with_content_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.content_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_turn_seconds(mut self, seconds: u32) -> Self {
        self.turn_seconds = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_continued_movement(mut self, enabled: bool) -> Self {
        self.continued_movement = Some(enabled);
        self
    }

    pub fn factory(&self) -> ContentFactory {
        match &self.content_dir {
            Some(dir) => ContentFactory::new(dir.clone()),
            None => ContentFactory::builtin(),
        }
    }

    /// Loads the content bundle and applies the rule overrides.
    pub fn load_content(&self) -> Result<ContentBundle> {
        let mut bundle = self
            .factory()
            .load_bundle()
            .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;

        if let Some(seconds) = self.turn_seconds {
            bundle.config.turn_duration_secs = seconds;
        }
        if let Some(enabled) = self.continued_movement {
            bundle.config.continued_movement = enabled;
        }
        Ok(bundle)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
