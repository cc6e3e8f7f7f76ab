//! Utility functions for xtask commands

use std::path::Path;

use anyhow::{Context, Result};
use sight_content::{ConfigLoader, MapLoader, MapRecords};
use sight_core::VisionConfig;

/// Load the vision config, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<VisionConfig> {
    match path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(VisionConfig::default()),
    }
}

pub fn load_map(path: &Path, config: &VisionConfig) -> Result<MapRecords> {
    MapLoader::load(path, config).with_context(|| format!("Failed to load map: {}", path.display()))
}
