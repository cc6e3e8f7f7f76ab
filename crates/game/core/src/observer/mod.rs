//! Observers standing on tiles and what they can see.
//!
//! An [`Observer`] refers to its tile by id; the [`TileGraph`] owns the tile.
//! Moving an observer keeps the occupancy flags in step: the old tile is
//! released and the new one claimed in the same call, so a tile is occupied
//! exactly while one observer stands on it.
mod error;
mod visibility;

pub use error::ObserverError;
pub use visibility::{
    SightRule, Traversability, visible_tile_ids, visible_tiles, visible_tiles_with,
};

use crate::config::VisionConfig;
use crate::ids::{ObserverId, TileId};
use crate::map::{ObserverRecord, Tile, TileGraph};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observer {
    id: ObserverId,
    view_radius: u32,
    tile: Option<TileId>,
    /// Set while this observer holds the occupancy flag of `tile`.
    claimed: bool,
}

impl Observer {
    pub fn new(id: ObserverId, view_radius: u32, tile: Option<TileId>) -> Self {
        Self {
            id,
            view_radius,
            tile,
            claimed: false,
        }
    }

    /// Materializes a stored observer, clamping its radius to the configured
    /// maximum.
    pub fn from_record(record: ObserverRecord, config: &VisionConfig) -> Self {
        let view_radius = config.clamp_radius(record.view_radius);
        if view_radius != record.view_radius {
            tracing::warn!(
                observer = %record.id,
                stored = record.view_radius,
                clamped = view_radius,
                "view radius exceeds configured maximum"
            );
        }
        Self::new(record.id, view_radius, Some(record.tile_id))
    }

    /// Record for write-back, or `None` while the observer stands nowhere.
    pub fn to_record(&self) -> Option<ObserverRecord> {
        self.tile.map(|tile_id| ObserverRecord {
            id: self.id,
            view_radius: self.view_radius,
            tile_id,
        })
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    pub fn view_radius(&self) -> u32 {
        self.view_radius
    }

    pub fn set_view_radius(&mut self, view_radius: u32) {
        self.view_radius = view_radius;
    }

    pub fn tile_id(&self) -> Option<TileId> {
        self.tile
    }

    /// Whether this observer currently holds its tile's occupancy.
    ///
    /// False until [`enter`](Self::enter) or [`move_to`](Self::move_to)
    /// succeeds, and again after [`leave`](Self::leave).
    pub fn holds_tile(&self) -> bool {
        self.claimed
    }

    pub fn current_tile<'g>(&self, graph: &'g TileGraph) -> Option<&'g Tile> {
        self.tile.and_then(|id| graph.tile_by_id(id))
    }

    /// Claims the current tile after the observer has been loaded.
    ///
    /// Call once per observer after building the graph. An observer with no
    /// tile has nothing to claim, and one already holding its tile keeps it.
    /// A failed claim leaves the graph untouched and the observer unclaimed.
    pub fn enter(&mut self, graph: &mut TileGraph) -> Result<(), ObserverError> {
        let Some(id) = self.tile else {
            return Ok(());
        };
        if self.claimed {
            return Ok(());
        }
        let tile = graph
            .tile_by_id_mut(id)
            .ok_or(ObserverError::TileNotFound(id))?;
        if tile.is_occupied() {
            return Err(ObserverError::TileOccupied {
                tile: id,
                position: tile.position(),
            });
        }
        tile.set_occupied(true);
        self.claimed = true;
        tracing::debug!(observer = %self.id, tile = %id, "observer entered map");
        Ok(())
    }

    /// Moves the observer onto `destination`, releasing the tile it held.
    ///
    /// Nothing changes when the destination does not exist or another
    /// observer occupies it. Moving onto the current tile is a no-op when the
    /// observer already holds it and a claim attempt otherwise.
    pub fn move_to(
        &mut self,
        graph: &mut TileGraph,
        destination: TileId,
    ) -> Result<(), ObserverError> {
        if self.tile == Some(destination) {
            return self.enter(graph);
        }

        let target = graph
            .tile_by_id(destination)
            .ok_or(ObserverError::TileNotFound(destination))?;
        if target.is_occupied() {
            return Err(ObserverError::TileOccupied {
                tile: destination,
                position: target.position(),
            });
        }

        self.release(graph);
        if let Some(tile) = graph.tile_by_id_mut(destination) {
            tile.set_occupied(true);
        }
        tracing::debug!(
            observer = %self.id,
            from = ?self.tile,
            to = %destination,
            "observer moved"
        );
        self.tile = Some(destination);
        self.claimed = true;
        Ok(())
    }

    /// Takes the observer off the map, releasing its tile.
    pub fn leave(&mut self, graph: &mut TileGraph) {
        self.release(graph);
        self.tile = None;
    }

    /// Tiles this observer can currently see. See [`visible_tiles`].
    pub fn visible_tiles<'g>(&self, graph: &'g TileGraph) -> Vec<&'g Tile> {
        visible_tiles(self, graph)
    }

    /// Clears occupancy only on a tile this observer actually holds.
    fn release(&mut self, graph: &mut TileGraph) {
        if !std::mem::take(&mut self.claimed) {
            return;
        }
        if let Some(tile) = self.tile.and_then(|id| graph.tile_by_id_mut(id)) {
            tile.set_occupied(false);
        }
    }
}
