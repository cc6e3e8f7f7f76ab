use std::collections::BTreeSet;
use std::fs;

use sight_content::{ContentFactory, MapLoader};
use sight_core::{
    ObserverId, Point, RecordSource, TileId, VisionConfig, load_graph, load_observer,
    visible_tile_ids, visible_tiles,
};

fn visible_positions(ids: &BTreeSet<TileId>, graph: &sight_core::TileGraph) -> BTreeSet<Point> {
    ids.iter()
        .map(|id| graph.tile_by_id(*id).unwrap().position())
        .collect()
}

#[test]
fn bundled_courtyard_loads_with_directory_config() {
    let factory = ContentFactory::bundled();
    let config = factory.load_config().unwrap();
    assert_eq!(config.default_view_radius, 6);
    assert_eq!(config.max_view_radius, 32);

    let records = factory.load_map("courtyard").unwrap();
    assert_eq!(records.dimensions(), (12, 8));
    assert_eq!(records.observer_ids(), &[ObserverId(1), ObserverId(2)]);
    assert_eq!(records.observer(ObserverId(2)).unwrap().view_radius, 6);

    let graph = records.graph();
    assert_eq!(graph.len(), 96);
    assert_eq!(graph.iter().filter(|tile| tile.is_wall()).count(), 7);
}

#[test]
fn courtyard_partition_hides_the_far_side() {
    let factory = ContentFactory::bundled();
    let config = factory.load_config().unwrap();
    let records = factory.load_map("courtyard").unwrap();
    let mut graph = records.graph();

    let watcher = load_observer(&records, &mut graph, ObserverId(1), &config).unwrap();
    let other = load_observer(&records, &mut graph, ObserverId(2), &config).unwrap();

    let seen = visible_positions(&visible_tile_ids(&watcher, &graph), &graph);
    assert!(seen.contains(&Point::new(1, 3)));
    assert!(seen.contains(&Point::new(5, 3)), "partition wall is visible");
    assert!(!seen.contains(&Point::new(6, 3)));
    assert!(!seen.contains(&Point::new(7, 3)));

    let own = visible_tiles(&other, &graph);
    assert_eq!(own[0].position(), Point::new(10, 6));
}

#[test]
fn crossroads_view_follows_the_corridors() {
    let records = ContentFactory::bundled().load_map("crossroads").unwrap();
    let mut graph = records.graph();
    let observer =
        load_observer(&records, &mut graph, ObserverId(1), &VisionConfig::default()).unwrap();

    let seen = visible_positions(&visible_tile_ids(&observer, &graph), &graph);
    for i in 0..9 {
        assert!(seen.contains(&Point::new(i, 4)), "row tile ({i},4)");
        assert!(seen.contains(&Point::new(4, i)), "column tile (4,{i})");
    }
    assert!(!seen.contains(&Point::new(0, 0)));
    assert!(!seen.contains(&Point::new(8, 8)));
    assert!(!seen.contains(&Point::new(1, 1)));
}

#[test]
fn factory_reads_maps_from_a_custom_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("maps")).unwrap();
    fs::write(dir.path().join("config.toml"), "default_view_radius = 3\n").unwrap();
    fs::write(
        dir.path().join("maps").join("room.ron"),
        "(map_id: 9, dimensions: (5, 5), walls: [(2, 1)], observers: [(id: 1, position: (2, 2))])",
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let records = factory.load_map("room").unwrap();
    let mut graph = records.graph();
    let config = factory.load_config().unwrap();
    let observer = load_observer(&records, &mut graph, ObserverId(1), &config).unwrap();

    assert_eq!(observer.view_radius(), 3);
    let seen = visible_positions(&visible_tile_ids(&observer, &graph), &graph);
    assert!(seen.contains(&Point::new(2, 1)));
    assert!(!seen.contains(&Point::new(2, 0)));
}

#[test]
fn missing_config_uses_defaults_and_missing_map_fails() {
    let dir = tempfile::tempdir().unwrap();
    let factory = ContentFactory::new(dir.path());

    assert_eq!(factory.load_config().unwrap(), VisionConfig::default());
    let err = factory.load_map("nowhere").unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn edited_walls_survive_write_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strip.ron");
    fs::write(&path, "(map_id: 4, dimensions: (6, 1))").unwrap();

    let records = MapLoader::load(&path, &VisionConfig::default()).unwrap();
    let map_id = records.map_id();
    let mut graph = records.graph();
    assert!(graph.set_wall(Point::new(3, 0), true));

    let mut source = records.into_source();
    source.update_tiles(graph.records());
    let reloaded = load_graph(&source, map_id);
    assert!(reloaded.get_tile(3, 0).unwrap().is_wall());
    assert_eq!(source.tiles_for_map(map_id).len(), 6);
}
