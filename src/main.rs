//! Track Shelf - A track library manager with catalog enrichment.
//!
//! This application keeps a JSON-backed library of tracks, offers sorted,
//! filtered and aggregate views over it, and enriches individual tracks with
//! metadata looked up in an online music catalog.

pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod library;
pub mod model;
pub mod player;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr, so command output stays clean)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("track_shelf=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
