use std::collections::HashMap;

use crate::ids::TileId;

/// Memoized values derived from a tile (items lying on it, an attached exit).
///
/// Entries are computed on first access and kept until the owner calls
/// [`TileCache::invalidate`]. Mutating a tile never clears its entry.
#[derive(Clone, Debug)]
pub struct TileCache<T> {
    entries: HashMap<TileId, T>,
}

impl<T> TileCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Cached value for `tile`, if one has been computed.
    pub fn get(&self, tile: TileId) -> Option<&T> {
        self.entries.get(&tile)
    }

    pub fn is_cached(&self, tile: TileId) -> bool {
        self.entries.contains_key(&tile)
    }

    pub fn get_or_insert_with<F>(&mut self, tile: TileId, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.entries.entry(tile).or_insert_with(compute)
    }

    /// Drops the cached value for `tile`, returning it.
    pub fn invalidate(&mut self, tile: TileId) -> Option<T> {
        self.entries.remove(&tile)
    }

    /// Invalidates and recomputes in one step.
    pub fn refetch<F>(&mut self, tile: TileId, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.entries.remove(&tile);
        self.get_or_insert_with(tile, compute)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TileCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
