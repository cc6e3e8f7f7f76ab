use arrayvec::ArrayVec;

use crate::geometry::{Direction, Point};
use crate::ids::{MapId, TileId};

use super::TileRecord;

/// Stable position of a tile inside its [`TileGraph`](super::TileGraph) arena.
///
/// Indices stay valid for the lifetime of the graph because tiles are never
/// removed after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileIndex(usize);

impl TileIndex {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

/// A single addressable cell of a map.
///
/// Neighbor links are arena indices owned by the graph, not references, so a
/// tile never keeps another tile alive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    map_id: MapId,
    position: Point,
    is_wall: bool,
    is_occupied: bool,
    neighbors: [Option<TileIndex>; 4],
}

impl Tile {
    pub fn new(id: TileId, map_id: MapId, position: Point, is_wall: bool) -> Self {
        Self {
            id,
            map_id,
            position,
            is_wall,
            is_occupied: false,
            neighbors: [None; 4],
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn map_id(&self) -> MapId {
        self.map_id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    pub fn is_wall(&self) -> bool {
        self.is_wall
    }

    /// True while an observer stands on this tile.
    pub fn is_occupied(&self) -> bool {
        self.is_occupied
    }

    /// A tile can be walked through (and seen through) unless it is a wall
    /// or somebody is standing on it.
    pub fn is_traversable(&self) -> bool {
        !self.is_wall && !self.is_occupied
    }

    pub fn set_wall(&mut self, is_wall: bool) {
        self.is_wall = is_wall;
    }

    pub fn set_occupied(&mut self, is_occupied: bool) {
        self.is_occupied = is_occupied;
    }

    pub fn neighbor(&self, direction: Direction) -> Option<TileIndex> {
        self.neighbors[direction.slot()]
    }

    /// Indices of the neighbors that exist, in north, south, west, east order.
    pub fn neighbor_indices(&self) -> ArrayVec<TileIndex, 4> {
        Direction::ALL
            .iter()
            .filter_map(|direction| self.neighbor(*direction))
            .collect()
    }

    pub fn distance_to(&self, other: &Tile) -> f64 {
        self.position.distance(other.position)
    }

    pub fn to_record(&self) -> TileRecord {
        TileRecord {
            id: self.id,
            map_id: self.map_id,
            is_wall: self.is_wall,
            x: self.position.x,
            y: self.position.y,
        }
    }

    pub(crate) fn link(&mut self, direction: Direction, neighbor: Option<TileIndex>) {
        self.neighbors[direction.slot()] = neighbor;
    }
}

impl From<TileRecord> for Tile {
    fn from(record: TileRecord) -> Self {
        Self::new(record.id, record.map_id, record.position(), record.is_wall)
    }
}
