//! Observer errors.
//!
//! Errors raised by occupancy transitions and by loading observers from a
//! record source. Visibility queries themselves never fail.

use crate::error::{ErrorSeverity, SightError};
use crate::geometry::Point;
use crate::ids::{ObserverId, TileId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObserverError {
    /// The tile id does not resolve in the observer's tile graph.
    #[error("tile {0} not found in the tile graph")]
    TileNotFound(TileId),

    /// Another observer already stands on the destination.
    #[error("tile {tile} at {position} is already occupied")]
    TileOccupied { tile: TileId, position: Point },

    /// The record source has no observer with this id.
    #[error("observer {0} not found")]
    ObserverNotFound(ObserverId),
}

impl SightError for ObserverError {
    fn severity(&self) -> ErrorSeverity {
        use ObserverError::*;
        match self {
            TileOccupied { .. } => ErrorSeverity::Recoverable,
            TileNotFound(_) | ObserverNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ObserverError::*;
        match self {
            TileNotFound(_) => "OBSERVER_TILE_NOT_FOUND",
            TileOccupied { .. } => "OBSERVER_TILE_OCCUPIED",
            ObserverNotFound(_) => "OBSERVER_NOT_FOUND",
        }
    }
}
