//! Subcommand implementations.

pub(crate) mod board;
pub(crate) mod path;
pub(crate) mod replay;

use std::path::PathBuf;

use anyhow::Result;
use battle_content::ContentBundle;
use battle_runtime::RuntimeConfig;

/// Environment configuration with the `--content` flag taking precedence.
pub(crate) fn runtime_config(content: Option<PathBuf>) -> RuntimeConfig {
    let config = RuntimeConfig::from_env();
    match content {
        Some(dir) => config.with_content_dir(dir),
        None => config,
    }
}

pub(crate) fn load_content(content: Option<PathBuf>) -> Result<ContentBundle> {
    Ok(runtime_config(content).load_content()?)
}
