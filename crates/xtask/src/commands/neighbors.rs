//! Show the four-directional adjacency of one tile

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use sight_core::{Direction, Point};

use crate::utils;

/// Show the adjacency of a single tile
#[derive(Parser)]
pub struct Neighbors {
    /// Map file (RON)
    #[arg(short, long, value_name = "FILE")]
    map: PathBuf,

    /// Tile coordinate as "x,y"
    #[arg(short, long, value_name = "X,Y", allow_hyphen_values = true)]
    at: Point,
}

impl Neighbors {
    pub fn execute(self) -> Result<()> {
        let config = utils::load_config(None)?;
        let records = utils::load_map(&self.map, &config)?;
        let graph = records.graph();

        let tile = graph
            .tile_at(self.at)
            .with_context(|| format!("No tile at {}", self.at))?;

        println!(
            "{} {} at {}{}",
            style("Tile:").bold().cyan(),
            tile.id(),
            tile.position(),
            if tile.is_wall() { " (wall)" } else { "" }
        );

        for direction in Direction::ALL {
            let neighbor = tile.neighbor(direction).and_then(|index| graph.tile(index));
            match neighbor {
                Some(neighbor) => println!(
                    "  {:<6} {} at {}{}",
                    direction.as_ref(),
                    neighbor.id(),
                    neighbor.position(),
                    if neighbor.is_wall() { " (wall)" } else { "" }
                ),
                None => println!("  {:<6} {}", direction.as_ref(), style("-").dim()),
            }
        }

        Ok(())
    }
}
