//! Tiles of a map and the graph that owns them.
//!
//! [`TileGraph`] holds every [`Tile`] of one map in an arena and links each
//! tile to its four cardinal neighbors by arena index. [`TileCache`] keeps
//! per-tile derived values that callers invalidate explicitly.
mod cache;
mod graph;
mod records;
mod tile;

pub use cache::TileCache;
pub use graph::TileGraph;
pub use records::{ObserverRecord, TileRecord};
pub use tile::{Tile, TileIndex};
