//! Tile-grid visibility for a tile-oriented world.
//!
//! `sight-core` owns the tiles of a map ([`TileGraph`]), computes which of
//! them an [`Observer`] can see with recursive shadowcasting ([`fov`]), and
//! keeps tile occupancy in step with observer movement. Everything here is
//! synchronous and in-memory; records come from a [`RecordSource`] supplied
//! by the surrounding application.
pub mod config;
pub mod error;
pub mod fov;
pub mod geometry;
pub mod ids;
pub mod map;
pub mod observer;
pub mod source;

pub use config::VisionConfig;
pub use error::{ErrorSeverity, SightError};
pub use fov::{compute_fov, visible_points};
pub use geometry::{Direction, ParsePointError, Point};
pub use ids::{MapId, ObserverId, TileId};
pub use map::{ObserverRecord, Tile, TileCache, TileGraph, TileIndex, TileRecord};
pub use observer::{
    Observer, ObserverError, SightRule, Traversability, visible_tile_ids, visible_tiles,
    visible_tiles_with,
};
pub use source::{MemorySource, RecordSource, load_graph, load_observer};
