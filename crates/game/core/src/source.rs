//! Read-only access to stored tile and observer records.
//!
//! The persistence collaborator is abstracted as a [`RecordSource`]; the core
//! never issues queries of its own beyond what is needed to assemble a
//! [`TileGraph`] and its observers.

use std::collections::HashMap;

use crate::config::VisionConfig;
use crate::ids::{MapId, ObserverId};
use crate::map::{ObserverRecord, TileGraph, TileRecord};
use crate::observer::{Observer, ObserverError};

/// Record store exposing the rows the visibility core consumes.
pub trait RecordSource {
    /// Every tile row belonging to `map`.
    fn tiles_for_map(&self, map: MapId) -> Vec<TileRecord>;

    fn observer(&self, id: ObserverId) -> Option<ObserverRecord>;
}

/// In-memory [`RecordSource`].
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    tiles: Vec<TileRecord>,
    observers: HashMap<ObserverId, ObserverRecord>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tiles<I>(mut self, tiles: I) -> Self
    where
        I: IntoIterator<Item = TileRecord>,
    {
        self.tiles.extend(tiles);
        self
    }

    pub fn with_observer(mut self, observer: ObserverRecord) -> Self {
        self.insert_observer(observer);
        self
    }

    pub fn insert_observer(&mut self, observer: ObserverRecord) {
        self.observers.insert(observer.id, observer);
    }

    /// Replaces stored rows with the given ones, matching by tile id.
    pub fn update_tiles<I>(&mut self, tiles: I)
    where
        I: IntoIterator<Item = TileRecord>,
    {
        for record in tiles {
            match self.tiles.iter_mut().find(|stored| stored.id == record.id) {
                Some(stored) => *stored = record,
                None => self.tiles.push(record),
            }
        }
    }

    pub fn observers(&self) -> impl Iterator<Item = &ObserverRecord> + '_ {
        self.observers.values()
    }
}

impl RecordSource for MemorySource {
    fn tiles_for_map(&self, map: MapId) -> Vec<TileRecord> {
        self.tiles
            .iter()
            .filter(|record| record.map_id == map)
            .copied()
            .collect()
    }

    fn observer(&self, id: ObserverId) -> Option<ObserverRecord> {
        self.observers.get(&id).copied()
    }
}

/// Builds the tile graph for one map.
pub fn load_graph<S>(source: &S, map: MapId) -> TileGraph
where
    S: RecordSource + ?Sized,
{
    let records = source.tiles_for_map(map);
    tracing::debug!(map = %map, tiles = records.len(), "loading map");
    TileGraph::from_records(records)
}

/// Loads an observer and claims its tile in `graph`.
///
/// An observer whose tile is not part of `graph` still loads; it simply sees
/// nothing until moved.
pub fn load_observer<S>(
    source: &S,
    graph: &mut TileGraph,
    id: ObserverId,
    config: &VisionConfig,
) -> Result<Observer, ObserverError>
where
    S: RecordSource + ?Sized,
{
    let record = source
        .observer(id)
        .ok_or(ObserverError::ObserverNotFound(id))?;
    let mut observer = Observer::from_record(record, config);

    match observer.enter(graph) {
        Ok(()) => Ok(observer),
        Err(ObserverError::TileNotFound(tile)) => {
            tracing::warn!(observer = %id, tile = %tile, "observer tile is not on this map");
            Ok(observer)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TileId;
    use crate::observer::{visible_tile_ids, visible_tiles};

    fn tile(id: u32, map: u32, x: i32, y: i32) -> TileRecord {
        TileRecord {
            id: TileId(id),
            map_id: MapId(map),
            is_wall: false,
            x,
            y,
        }
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_tiles([tile(1, 1, 0, 0), tile(2, 1, 1, 0), tile(3, 2, 0, 0)])
            .with_observer(ObserverRecord {
                id: ObserverId(1),
                view_radius: 4,
                tile_id: TileId(1),
            })
            .with_observer(ObserverRecord {
                id: ObserverId(2),
                view_radius: 4,
                tile_id: TileId(3),
            })
    }

    #[test]
    fn graph_contains_only_the_requested_map() {
        let graph = load_graph(&source(), MapId(1));
        assert_eq!(graph.len(), 2);
        assert!(graph.tile_by_id(TileId(3)).is_none());
    }

    #[test]
    fn loaded_observer_occupies_its_tile() {
        let source = source();
        let mut graph = load_graph(&source, MapId(1));
        let observer =
            load_observer(&source, &mut graph, ObserverId(1), &VisionConfig::default()).unwrap();

        assert!(graph.tile_by_id(TileId(1)).unwrap().is_occupied());
        assert_eq!(visible_tile_ids(&observer, &graph).len(), 2);
    }

    #[test]
    fn observer_on_another_map_sees_nothing() {
        let source = source();
        let mut graph = load_graph(&source, MapId(1));
        let observer =
            load_observer(&source, &mut graph, ObserverId(2), &VisionConfig::default()).unwrap();
        assert!(visible_tiles(&observer, &graph).is_empty());
    }

    #[test]
    fn unknown_observer_is_an_error() {
        let source = source();
        let mut graph = load_graph(&source, MapId(1));
        let err = load_observer(&source, &mut graph, ObserverId(9), &VisionConfig::default())
            .unwrap_err();
        assert_eq!(err, ObserverError::ObserverNotFound(ObserverId(9)));
    }

    #[test]
    fn write_back_replaces_rows_by_id() {
        let mut source = source();
        let mut graph = load_graph(&source, MapId(1));
        graph.set_wall(crate::geometry::Point::new(1, 0), true);
        source.update_tiles(graph.records());

        let reloaded = load_graph(&source, MapId(1));
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.get_tile(1, 0).unwrap().is_wall());
    }
}
