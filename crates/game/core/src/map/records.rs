//! Plain row shapes exchanged with the persistence collaborator.

use crate::geometry::Point;
use crate::ids::{MapId, ObserverId, TileId};

/// Persisted form of a tile. Occupancy is transient and never part of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileRecord {
    pub id: TileId,
    pub map_id: MapId,
    pub is_wall: bool,
    pub x: i32,
    pub y: i32,
}

impl TileRecord {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Persisted form of an observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserverRecord {
    pub id: ObserverId,
    pub view_radius: u32,
    pub tile_id: TileId,
}
