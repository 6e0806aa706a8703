pub mod build;
pub mod config;

use crate::core::config::{default_config, load_config, Config};
use crate::core::paths;
use anyhow::Context;
use std::path::Path;

/// Load the given config file, or the default one if it exists
pub(crate) fn resolve_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let default_path = paths::default_config_path();
            if default_path.exists() {
                load_config(&default_path)
                    .with_context(|| format!("Failed to load config from {}", default_path.display()))
            } else {
                Ok(default_config())
            }
        }
    }
}
