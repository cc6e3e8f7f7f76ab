//! Vision configuration loader.

use std::path::Path;

use sight_core::VisionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for vision configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> LoadResult<VisionConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<VisionConfig> {
        let config: VisionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            config.default_view_radius <= config.max_view_radius,
            "default_view_radius {} exceeds max_view_radius {}",
            config.default_view_radius,
            config.max_view_radius
        );

        Ok(config)
    }
}
