//! Content factory for loading maps and configuration from a data directory.

use std::path::{Path, PathBuf};

use sight_core::VisionConfig;

use crate::loaders::{ConfigLoader, LoadResult, MapLoader, MapRecords};

/// Content factory that loads visibility content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── maps/
///     ├── courtyard.ron
///     └── crossroads.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load vision configuration from `config.toml`, or defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<VisionConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(VisionConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load `maps/<name>.ron` using the directory's configuration.
    pub fn load_map(&self, name: &str) -> LoadResult<MapRecords> {
        let config = self.load_config()?;
        let path = self.data_dir.join("maps").join(format!("{name}.ron"));
        MapLoader::load(&path, &config)
    }
}
