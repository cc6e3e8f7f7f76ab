use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use crate::fov;
use crate::ids::TileId;
use crate::map::{Tile, TileGraph};

use super::Observer;

/// Decides whether a grid point stops an observer's line of sight.
///
/// `tile` is `None` where the map has no tile.
pub trait SightRule {
    fn blocks_sight(&self, tile: Option<&Tile>) -> bool;
}

/// Sight is blocked by missing tiles and by any tile that is not traversable
/// (walls, and tiles somebody else is standing on).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Traversability;

impl SightRule for Traversability {
    fn blocks_sight(&self, tile: Option<&Tile>) -> bool {
        tile.is_none_or(|tile| !tile.is_traversable())
    }
}

impl<F> SightRule for F
where
    F: Fn(Option<&Tile>) -> bool,
{
    fn blocks_sight(&self, tile: Option<&Tile>) -> bool {
        self(tile)
    }
}

/// Tiles the observer can currently see, using [`Traversability`].
///
/// Tiles come back in the order the field of view reached them and may repeat
/// where octants overlap. Use [`visible_tile_ids`] for a de-duplicated set.
pub fn visible_tiles<'g>(observer: &Observer, graph: &'g TileGraph) -> Vec<&'g Tile> {
    visible_tiles_with(observer, graph, &Traversability)
}

/// Tiles the observer can see under a custom [`SightRule`].
///
/// An observer without a resolvable tile sees nothing. If the rule panics, the
/// panic is logged and the tiles collected up to that point are returned.
pub fn visible_tiles_with<'g, R>(
    observer: &Observer,
    graph: &'g TileGraph,
    rule: &R,
) -> Vec<&'g Tile>
where
    R: SightRule + ?Sized,
{
    let Some(origin) = observer.current_tile(graph) else {
        tracing::debug!(observer = %observer.id(), "observer has no tile, nothing visible");
        return Vec::new();
    };
    let origin = origin.position();

    let mut visible = Vec::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        fov::compute_fov(
            origin,
            |point| rule.blocks_sight(graph.tile_at(point)),
            |point| {
                if let Some(tile) = graph.tile_at(point) {
                    visible.push(tile);
                }
            },
            observer.view_radius(),
        );
    }));

    match outcome {
        Ok(()) => tracing::debug!(
            observer = %observer.id(),
            %origin,
            radius = observer.view_radius(),
            visible = visible.len(),
            "computed field of view"
        ),
        Err(payload) => tracing::error!(
            observer = %observer.id(),
            %origin,
            collected = visible.len(),
            reason = panic_reason(payload.as_ref()),
            "field of view aborted, returning partial result"
        ),
    }

    visible
}

/// De-duplicated identities of the tiles the observer can see.
pub fn visible_tile_ids(observer: &Observer, graph: &TileGraph) -> BTreeSet<TileId> {
    visible_tiles(observer, graph)
        .into_iter()
        .map(Tile::id)
        .collect()
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::ids::{MapId, ObserverId};

    /// Builds a graph from rows of `.` (floor), `#` (wall) and ` ` (no tile).
    fn graph(rows: &[&str]) -> TileGraph {
        let mut tiles = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.chars().enumerate() {
                if cell == ' ' {
                    continue;
                }
                let id = TileId((tiles.len() + 1) as u32);
                let position = Point::new(x as i32, y as i32);
                tiles.push(Tile::new(id, MapId(1), position, cell == '#'));
            }
        }
        TileGraph::new(tiles)
    }

    fn observer_at(graph: &mut TileGraph, x: i32, y: i32, radius: u32) -> Observer {
        let tile = graph.get_tile(x, y).unwrap().id();
        let mut observer = Observer::new(ObserverId(1), radius, None);
        observer.move_to(graph, tile).unwrap();
        observer
    }

    fn positions(tiles: &[&Tile]) -> BTreeSet<Point> {
        tiles.iter().map(|tile| tile.position()).collect()
    }

    #[test]
    fn radius_zero_sees_only_own_tile() {
        let mut graph = graph(&["...", "...", "..."]);
        let observer = observer_at(&mut graph, 1, 1, 0);

        let visible = visible_tiles(&observer, &graph);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].position(), Point::new(1, 1));
    }

    #[test]
    fn stale_tile_reference_sees_nothing() {
        let graph = graph(&["..."]);
        let observer = Observer::new(ObserverId(3), 5, Some(TileId(404)));
        assert!(visible_tiles(&observer, &graph).is_empty());

        let detached = Observer::new(ObserverId(4), 5, None);
        assert!(visible_tile_ids(&detached, &graph).is_empty());
    }

    #[test]
    fn open_room_radius_two_matches_euclidean_disk() {
        let mut graph = graph(&[".....", ".....", ".....", ".....", "....."]);
        let observer = observer_at(&mut graph, 2, 2, 2);

        let seen = positions(&visible_tiles(&observer, &graph));
        assert_eq!(seen.len(), 13);
        assert!(seen.contains(&Point::new(0, 2)));
        assert!(!seen.contains(&Point::new(0, 0)));
        assert_eq!(visible_tile_ids(&observer, &graph).len(), 13);
    }

    #[test]
    fn walls_are_seen_but_hide_the_room_behind() {
        let mut graph = graph(&[
            ".........",
            "....#....",
            ".........",
            "....#....",
            ".........",
        ]);
        let observer = observer_at(&mut graph, 4, 2, 6);
        let seen = positions(&visible_tiles(&observer, &graph));

        assert!(seen.contains(&Point::new(4, 1)));
        assert!(seen.contains(&Point::new(4, 3)));
        assert!(!seen.contains(&Point::new(4, 0)));
        assert!(!seen.contains(&Point::new(4, 4)));
        assert!(seen.contains(&Point::new(0, 2)));
        assert!(seen.contains(&Point::new(8, 2)));
    }

    #[test]
    fn missing_tiles_block_sight_and_are_never_returned() {
        let mut graph = graph(&[". ...."]);
        let observer = observer_at(&mut graph, 0, 0, 5);
        let seen = positions(&visible_tiles(&observer, &graph));
        assert_eq!(seen, BTreeSet::from([Point::new(0, 0)]));
    }

    #[test]
    fn other_observers_block_sight() {
        let mut graph = graph(&["......"]);
        let watcher = observer_at(&mut graph, 0, 0, 5);
        let blocker_tile = graph.get_tile(2, 0).unwrap().id();
        let mut blocker = Observer::new(ObserverId(2), 5, None);
        blocker.move_to(&mut graph, blocker_tile).unwrap();

        let seen = positions(&visible_tiles(&watcher, &graph));
        assert!(seen.contains(&Point::new(2, 0)), "occupied tile itself is visible");
        assert!(!seen.contains(&Point::new(3, 0)));

        blocker.leave(&mut graph);
        let seen = positions(&visible_tiles(&watcher, &graph));
        assert!(seen.contains(&Point::new(5, 0)));
    }

    #[test]
    fn duplicates_collapse_in_id_set() {
        let mut graph = graph(&[".....", ".....", "....."]);
        let observer = observer_at(&mut graph, 2, 1, 3);

        let tiles = visible_tiles(&observer, &graph);
        let ids = visible_tile_ids(&observer, &graph);
        assert!(tiles.len() >= ids.len());
        assert_eq!(ids.len(), positions(&tiles).len());
    }

    #[test]
    fn panicking_rule_yields_partial_result() {
        let mut graph = graph(&[".......", ".......", "......."]);
        let observer = observer_at(&mut graph, 3, 1, 4);

        let rule = |tile: Option<&Tile>| {
            if tile.is_some_and(|tile| tile.position() == Point::new(6, 1)) {
                panic!("corrupt tile row");
            }
            Traversability.blocks_sight(tile)
        };
        let visible = visible_tiles_with(&observer, &graph, &rule);

        assert!(!visible.is_empty());
        assert_eq!(visible[0].position(), Point::new(3, 1));
        assert!(visible.len() < visible_tiles(&observer, &graph).len());
    }

    #[test]
    fn custom_rule_can_ignore_occupancy() {
        let mut graph = graph(&["....."]);
        let observer = observer_at(&mut graph, 0, 0, 4);
        let neighbor = graph.get_tile(1, 0).unwrap().id();
        let mut other = Observer::new(ObserverId(9), 1, None);
        other.move_to(&mut graph, neighbor).unwrap();

        let walls_only = |tile: Option<&Tile>| tile.is_none_or(Tile::is_wall);
        let seen = positions(&visible_tiles_with(&observer, &graph, &walls_only));
        assert!(seen.contains(&Point::new(4, 0)));
    }
}
