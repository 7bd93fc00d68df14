//! Command-line interface for track-shelf.
//!
//! This module provides CLI commands for managing the track library,
//! querying it, and enriching tracks from the online catalog.

mod commands;

pub use commands::{Cli, Commands, run_command};
