//! Compute an observer's field of view on a map file
//!
//! Loads the map, places every observer listed in it, and reports the tiles
//! the chosen observer can see.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;

use sight_core::{
    Observer, ObserverId, Point, Tile, TileGraph, TileId, VisionConfig, load_observer,
    visible_tiles,
};

use crate::utils;

/// Compute and display what an observer can see
#[derive(Parser)]
pub struct Fov {
    /// Map file (RON)
    #[arg(short, long, value_name = "FILE")]
    map: PathBuf,

    /// Observer id as listed in the map file
    #[arg(short, long, value_name = "ID")]
    observer: u32,

    /// Vision config (TOML); built-in defaults when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the observer's view radius (capped at the configured maximum)
    #[arg(short, long, value_name = "RADIUS")]
    radius: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "ascii")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Grid dump: `@` observer, `o` other observer, `#` wall, `.` floor
    Ascii,
    /// Full JSON report
    Json,
}

#[derive(Serialize)]
struct FovReport {
    map_id: u32,
    observer: u32,
    origin: Option<Point>,
    view_radius: u32,
    visible: Vec<TileReport>,
}

#[derive(Serialize)]
struct TileReport {
    id: TileId,
    position: Point,
    is_wall: bool,
    is_occupied: bool,
}

impl From<&Tile> for TileReport {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.id(),
            position: tile.position(),
            is_wall: tile.is_wall(),
            is_occupied: tile.is_occupied(),
        }
    }
}

impl Fov {
    pub fn execute(self) -> Result<()> {
        let config = utils::load_config(self.config.as_deref())?;
        let records = utils::load_map(&self.map, &config)?;
        let mut graph = records.graph();

        let target = ObserverId(self.observer);
        let mut observer = None;
        for &id in records.observer_ids() {
            let loaded = load_observer(&records, &mut graph, id, &config)
                .with_context(|| format!("Failed to place observer {id}"))?;
            if id == target {
                observer = Some(loaded);
            }
        }
        let mut observer = observer
            .with_context(|| format!("Observer {target} is not listed in the map"))?;
        if let Some(radius) = self.radius {
            observer.set_view_radius(override_radius(&config, radius));
        }

        // Visit order may repeat tiles; keep the first occurrence only.
        let mut seen = BTreeSet::new();
        let visible: Vec<&Tile> = visible_tiles(&observer, &graph)
            .into_iter()
            .filter(|tile| seen.insert(tile.id()))
            .collect();

        match self.format {
            OutputFormat::Ascii => print_ascii(&observer, &graph, &visible, records.dimensions()),
            OutputFormat::Json => {
                print_json(&observer, &graph, &visible, records.map_id().get())?
            }
        }

        Ok(())
    }
}

/// Applies the configured cap to a radius given on the command line.
fn override_radius(config: &VisionConfig, requested: u32) -> u32 {
    let radius = config.clamp_radius(requested);
    if radius != requested {
        tracing::warn!(
            requested,
            clamped = radius,
            "--radius exceeds configured maximum"
        );
    }
    radius
}

fn print_ascii(
    observer: &Observer,
    graph: &TileGraph,
    visible: &[&Tile],
    (width, height): (u32, u32),
) {
    let origin = observer.current_tile(graph).map(Tile::position);
    let visible: BTreeSet<Point> = visible.iter().map(|tile| tile.position()).collect();

    println!(
        "{} {} (radius {})",
        style("Observer:").bold().cyan(),
        observer.id(),
        observer.view_radius()
    );
    println!(
        "{} {} of {} tiles",
        style("Visible:").bold().cyan(),
        visible.len(),
        graph.len()
    );
    println!();

    for y in 0..height as i32 {
        let line: String = (0..width as i32)
            .map(|x| {
                let point = Point::new(x, y);
                if Some(point) == origin {
                    return '@';
                }
                if !visible.contains(&point) {
                    return ' ';
                }
                match graph.tile_at(point) {
                    Some(tile) if tile.is_wall() => '#',
                    Some(tile) if tile.is_occupied() => 'o',
                    Some(_) => '.',
                    None => ' ',
                }
            })
            .collect();
        println!("{}", line.trim_end());
    }
}

fn print_json(
    observer: &Observer,
    graph: &TileGraph,
    visible: &[&Tile],
    map_id: u32,
) -> Result<()> {
    let report = FovReport {
        map_id,
        observer: observer.id().get(),
        origin: observer.current_tile(graph).map(Tile::position),
        view_radius: observer.view_radius(),
        visible: visible.iter().map(|tile| TileReport::from(*tile)).collect(),
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize FOV report")?;
    println!("{}", json);
    Ok(())
}
