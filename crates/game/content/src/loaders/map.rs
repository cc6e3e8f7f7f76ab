//! Map data loader.
//!
//! Loads a rectangular map layout and its observers from RON files:
//!
//! ```ron
//! (
//!     map_id: 1,
//!     dimensions: (8, 5),
//!     walls: [(3, 1), (3, 2)],
//!     observers: [(id: 1, position: (1, 2), view_radius: Some(6))],
//! )
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use sight_core::{
    MapId, MemorySource, ObserverId, ObserverRecord, Point, RecordSource, TileGraph, TileId,
    TileRecord, VisionConfig, load_graph,
};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct MapDataRon {
    map_id: u32,
    dimensions: (u32, u32),
    #[serde(default)]
    walls: Vec<(i32, i32)>,
    #[serde(default)]
    observers: Vec<ObserverRon>,
}

#[derive(Debug, Clone, Deserialize)]
struct ObserverRon {
    id: u32,
    position: (i32, i32),
    #[serde(default)]
    view_radius: Option<u32>,
}

/// Records produced by [`MapLoader`], served through [`RecordSource`].
#[derive(Clone, Debug)]
pub struct MapRecords {
    map_id: MapId,
    dimensions: (u32, u32),
    observers: Vec<ObserverId>,
    source: MemorySource,
}

impl MapRecords {
    pub fn map_id(&self) -> MapId {
        self.map_id
    }

    /// `(width, height)` of the map rectangle.
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// Observer ids in file order.
    pub fn observer_ids(&self) -> &[ObserverId] {
        &self.observers
    }

    pub fn graph(&self) -> TileGraph {
        load_graph(self, self.map_id)
    }

    pub fn into_source(self) -> MemorySource {
        self.source
    }
}

impl RecordSource for MapRecords {
    fn tiles_for_map(&self, map: MapId) -> Vec<TileRecord> {
        self.source.tiles_for_map(map)
    }

    fn observer(&self, id: ObserverId) -> Option<ObserverRecord> {
        self.source.observer(id)
    }
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load map data from a RON file.
    ///
    /// Observers without a `view_radius` get `config.default_view_radius`.
    pub fn load(path: &Path, config: &VisionConfig) -> LoadResult<MapRecords> {
        let content = read_file(path)?;
        let records = Self::parse(&content, config)
            .map_err(|e| anyhow::anyhow!("Invalid map {}: {}", path.display(), e))?;

        tracing::info!(
            path = %path.display(),
            map = %records.map_id,
            observers = records.observers.len(),
            "loaded map"
        );
        Ok(records)
    }

    pub fn parse(content: &str, config: &VisionConfig) -> LoadResult<MapRecords> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let map_id = MapId(data.map_id);
        let (width, height) = data.dimensions;
        let (Ok(columns), Ok(rows)) = (i32::try_from(width), i32::try_from(height)) else {
            anyhow::bail!("map dimensions {}x{} exceed the coordinate range", width, height);
        };
        let tile_count = width
            .checked_mul(height)
            .ok_or_else(|| anyhow::anyhow!("map dimensions {}x{} are too large", width, height))?;
        let contains = |(x, y): (i32, i32)| {
            x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
        };

        for wall in &data.walls {
            anyhow::ensure!(contains(*wall), "wall {:?} is outside the map", wall);
        }
        let walls: HashSet<(i32, i32)> = data.walls.into_iter().collect();

        // Every cell of the rectangle is a tile, ids assigned row-major from 1.
        let mut tiles = Vec::with_capacity(tile_count as usize);
        let mut ids = HashMap::with_capacity(tiles.capacity());
        for y in 0..rows {
            for x in 0..columns {
                let id = TileId(tiles.len() as u32 + 1);
                ids.insert((x, y), id);
                tiles.push(TileRecord {
                    id,
                    map_id,
                    is_wall: walls.contains(&(x, y)),
                    x,
                    y,
                });
            }
        }

        let mut source = MemorySource::new().with_tiles(tiles);
        let mut observers = Vec::with_capacity(data.observers.len());
        let mut standing = HashSet::with_capacity(data.observers.len());
        for observer in data.observers {
            let id = ObserverId(observer.id);
            anyhow::ensure!(!observers.contains(&id), "observer {} is listed twice", id);
            let tile_id = *ids.get(&observer.position).ok_or_else(|| {
                anyhow::anyhow!(
                    "observer {} stands outside the map at {}",
                    id,
                    Point::from(observer.position)
                )
            })?;
            anyhow::ensure!(
                standing.insert(tile_id),
                "observer {} shares position {} with another observer",
                id,
                Point::from(observer.position)
            );

            source.insert_observer(ObserverRecord {
                id,
                view_radius: observer.view_radius.unwrap_or(config.default_view_radius),
                tile_id,
            });
            observers.push(id);
        }

        Ok(MapRecords {
            map_id,
            dimensions: data.dimensions,
            observers,
            source,
        })
    }
}
