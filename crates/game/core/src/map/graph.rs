use std::collections::HashMap;

use arrayvec::ArrayVec;

use crate::geometry::{Direction, Point};
use crate::ids::TileId;

use super::{Tile, TileIndex, TileRecord};

/// Owning collection of every tile of one map, with coordinate lookup and
/// four-directional adjacency.
///
/// Membership is fixed at construction. Tile attributes (walls, occupancy)
/// may change afterwards, positions may not. Adjacency is computed eagerly;
/// call [`TileGraph::rebuild_adjacency`] after bulk edits that should be
/// reflected in it.
#[derive(Clone, Debug, Default)]
pub struct TileGraph {
    tiles: Vec<Tile>,
    by_position: HashMap<Point, TileIndex>,
    by_id: HashMap<TileId, TileIndex>,
}

impl TileGraph {
    /// Builds the graph from a map's tiles.
    ///
    /// Coordinates are expected to be unique. If two tiles share one, the
    /// later tile wins the coordinate slot; both stay in the collection.
    pub fn new(tiles: Vec<Tile>) -> Self {
        let mut by_position = HashMap::with_capacity(tiles.len());
        let mut by_id = HashMap::with_capacity(tiles.len());

        for (index, tile) in tiles.iter().enumerate() {
            let index = TileIndex::new(index);
            if let Some(previous) = by_position.insert(tile.position(), index) {
                tracing::warn!(
                    position = %tile.position(),
                    shadowed = %tiles[previous.get()].id(),
                    winner = %tile.id(),
                    "duplicate tile coordinate, keeping the later tile"
                );
            }
            by_id.insert(tile.id(), index);
        }

        let mut graph = Self {
            tiles,
            by_position,
            by_id,
        };
        graph.rebuild_adjacency();

        tracing::debug!(tiles = graph.tiles.len(), "built tile graph");
        graph
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = TileRecord>,
    {
        Self::new(records.into_iter().map(Tile::from).collect())
    }

    /// Re-derives every tile's neighbor links from the coordinate map.
    pub fn rebuild_adjacency(&mut self) {
        for index in 0..self.tiles.len() {
            let position = self.tiles[index].position();
            for direction in Direction::ALL {
                let neighbor = position
                    .step(direction, 1)
                    .and_then(|point| self.index_at(point));
                self.tiles[index].link(direction, neighbor);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    pub fn tile(&self, index: TileIndex) -> Option<&Tile> {
        self.tiles.get(index.get())
    }

    pub fn tile_mut(&mut self, index: TileIndex) -> Option<&mut Tile> {
        self.tiles.get_mut(index.get())
    }

    pub fn index_at(&self, position: Point) -> Option<TileIndex> {
        self.by_position.get(&position).copied()
    }

    pub fn tile_at(&self, position: Point) -> Option<&Tile> {
        self.index_at(position).and_then(|index| self.tile(index))
    }

    pub fn tile_at_mut(&mut self, position: Point) -> Option<&mut Tile> {
        let index = self.index_at(position)?;
        self.tile_mut(index)
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.tile_at(Point::new(x, y))
    }

    pub fn index_of(&self, id: TileId) -> Option<TileIndex> {
        self.by_id.get(&id).copied()
    }

    pub fn tile_by_id(&self, id: TileId) -> Option<&Tile> {
        self.index_of(id).and_then(|index| self.tile(index))
    }

    pub fn tile_by_id_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        let index = self.index_of(id)?;
        self.tile_mut(index)
    }

    /// Tile `distance` steps from `tile` in `direction`.
    ///
    /// This is a single jump to the target coordinate, not a walk: gaps in
    /// between do not matter. Targets outside the coordinate range resolve to
    /// `None`.
    pub fn offset(&self, tile: &Tile, direction: Direction, distance: u32) -> Option<&Tile> {
        self.tile_at(tile.position().step(direction, distance)?)
    }

    pub fn north_of(&self, tile: &Tile, distance: u32) -> Option<&Tile> {
        self.offset(tile, Direction::North, distance)
    }

    pub fn south_of(&self, tile: &Tile, distance: u32) -> Option<&Tile> {
        self.offset(tile, Direction::South, distance)
    }

    pub fn east_of(&self, tile: &Tile, distance: u32) -> Option<&Tile> {
        self.offset(tile, Direction::East, distance)
    }

    pub fn west_of(&self, tile: &Tile, distance: u32) -> Option<&Tile> {
        self.offset(tile, Direction::West, distance)
    }

    /// Resolved neighbor tiles, in north, south, west, east order.
    pub fn neighbors(&self, tile: &Tile) -> ArrayVec<&Tile, 4> {
        tile.neighbor_indices()
            .into_iter()
            .filter_map(|index| self.tile(index))
            .collect()
    }

    /// Sets the wall flag of the tile at `position`. Returns `false` when no
    /// tile exists there.
    pub fn set_wall(&mut self, position: Point, is_wall: bool) -> bool {
        match self.tile_at_mut(position) {
            Some(tile) => {
                tile.set_wall(is_wall);
                true
            }
            None => false,
        }
    }

    /// Snapshot of every tile as a persistable record, in arena order.
    pub fn records(&self) -> impl Iterator<Item = TileRecord> + '_ {
        self.tiles.iter().map(Tile::to_record)
    }
}
