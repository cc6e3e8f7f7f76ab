//! Development tasks for the visibility engine
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo run -p xtask -- <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Fov, Neighbors};

/// Development tasks for the visibility engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for map visibility", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Compute and display what an observer can see
    Fov(Fov),

    /// Show the adjacency of a single tile
    Neighbors(Neighbors),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Fov(cmd) => cmd.execute(),
        Command::Neighbors(cmd) => cmd.execute(),
    }
}
