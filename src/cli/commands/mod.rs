//! CLI command definitions and dispatch.
//!
//! This module is the presentation layer of Track Shelf. Each subcommand
//! opens the library, performs one action through the core, and prints the
//! outcome. Subcommands live in their own submodules:
//! - `library`: CRUD, generation, reordering and playback
//! - `stats`: read-only views (stats, artist groups)
//! - `enrich`: catalog search, enrichment, images, export/import

mod enrich;
mod library;
mod stats;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::library::{LibraryError, LibraryStore};
use crate::model::{TrackId, TrackRecord};

pub use enrich::{cmd_edit, cmd_enrich, cmd_export, cmd_images, cmd_import, cmd_search};
pub use library::{
    cmd_add, cmd_add_file, cmd_clear, cmd_generate, cmd_list, cmd_play, cmd_preview, cmd_remove,
    cmd_sort,
};
pub use stats::{cmd_groups, cmd_stats};

/// Track Shelf CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Library file (defaults to the configured or data-directory location)
    #[arg(long, global = true, env = "TRACK_SHELF_LIBRARY")]
    pub library: Option<PathBuf>,

    /// Config file (defaults to the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Track ordering used by `list` and `sort`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Shortest first
    Duration,
    /// Longest first
    DurationDesc,
    /// Alphabetical by title
    Title,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List tracks
    List {
        /// Show a sorted view (stored order is unchanged)
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        /// Only tracks whose artist or title contains this text
        #[arg(short, long)]
        filter: Option<String>,
        /// Only short tracks
        #[arg(long)]
        short: bool,
        /// Threshold in minutes for --short (default from config)
        #[arg(long, requires = "short")]
        threshold: Option<f64>,
    },
    /// Add a manual track with no audio file
    Add {
        /// Artist name
        #[arg(long)]
        artist: String,
        /// Track title
        #[arg(long)]
        title: String,
        /// Duration in minutes
        #[arg(long)]
        duration: f64,
    },
    /// Add a track for a local audio file
    AddFile {
        /// Path to the audio file
        path: PathBuf,
        /// Artist name
        #[arg(long)]
        artist: String,
        /// Track title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
        /// Duration in minutes
        #[arg(long)]
        duration: f64,
    },
    /// Remove a track by id
    Remove {
        /// Track id or unique id prefix
        id: String,
    },
    /// Delete all tracks
    Clear {
        /// Confirm deleting every track
        #[arg(long)]
        yes: bool,
    },
    /// Replace the library with randomly generated tracks
    Generate {
        /// Number of tracks (default from config)
        #[arg(short, long)]
        count: Option<usize>,
    },
    /// Reorder the stored library
    Sort {
        #[arg(value_enum)]
        key: SortKey,
    },
    /// Show total, average and longest track
    Stats,
    /// Count tracks per artist
    Groups,
    /// Search the catalog without touching the library
    Search {
        /// Search term
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
    /// Search the catalog for a track and optionally apply a result
    Enrich {
        /// Track id or unique id prefix
        id: String,
        /// Search term (defaults to "artist title")
        #[arg(short, long)]
        term: Option<String>,
        /// Apply the result with this 1-based number
        #[arg(short, long)]
        pick: Option<usize>,
    },
    /// Edit a track's artist, title or duration
    Edit {
        /// Track id or unique id prefix
        id: String,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// Duration in minutes
        #[arg(long)]
        duration: Option<String>,
    },
    /// Manage a track's image list
    Images {
        /// Track id or unique id prefix
        id: String,
        #[command(subcommand)]
        action: ImageAction,
    },
    /// Save a track to a JSON file
    Export {
        /// Track id or unique id prefix
        id: String,
        /// Destination JSON file
        path: PathBuf,
    },
    /// Load a track's metadata from a JSON file (keeps id and audio file)
    Import {
        /// Track id or unique id prefix
        id: String,
        /// Source JSON file
        path: PathBuf,
    },
    /// Play a track's audio file
    Play {
        /// Track id or unique id prefix
        id: String,
    },
    /// Open a track's catalog preview clip
    Preview {
        /// Track id or unique id prefix
        id: String,
    },
    /// Show the active configuration
    Config {
        /// Write the active configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

/// Image list actions
#[derive(Subcommand)]
pub enum ImageAction {
    /// List images
    List,
    /// Add image paths or URLs (duplicates are skipped)
    Add {
        #[arg(num_args = 1..)]
        paths: Vec<String>,
    },
    /// Remove one image
    Remove { path: String },
}

/// Settings shared by every command.
pub struct Context {
    pub config: Config,
    pub library_path: PathBuf,
}

impl Context {
    fn from_cli(cli: &Cli) -> Self {
        let config = match &cli.config {
            Some(path) => config::load_from(path),
            None => config::load(),
        };
        let library_path = cli
            .library
            .clone()
            .unwrap_or_else(|| config.library.resolved_file());
        Self {
            config,
            library_path,
        }
    }

    /// Open the library.
    ///
    /// A corrupt file is reported and left alone; nothing is reset.
    pub fn open_library(&self) -> anyhow::Result<LibraryStore> {
        match LibraryStore::open(&self.library_path) {
            Ok(store) => Ok(store),
            Err(e @ LibraryError::CorruptLibraryData { .. }) => {
                eprintln!("✗ {}", e);
                eprintln!("  The file was left untouched. Fix or move it, then try again.");
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let ctx = Context::from_cli(cli);
    tracing::debug!(library = %ctx.library_path.display(), "Using library file");

    match &cli.command {
        Commands::List {
            sort,
            filter,
            short,
            threshold,
        } => {
            let threshold = short.then(|| threshold.unwrap_or(ctx.config.query.short_threshold_minutes));
            cmd_list(&ctx, *sort, filter.as_deref(), threshold)
        }
        Commands::Add {
            artist,
            title,
            duration,
        } => cmd_add(&ctx, artist, title, *duration),
        Commands::AddFile {
            path,
            artist,
            title,
            duration,
        } => cmd_add_file(&ctx, path, artist, title.as_deref(), *duration),
        Commands::Remove { id } => cmd_remove(&ctx, id),
        Commands::Clear { yes } => cmd_clear(&ctx, *yes),
        Commands::Generate { count } => {
            cmd_generate(&ctx, count.unwrap_or(ctx.config.generator.count))
        }
        Commands::Sort { key } => cmd_sort(&ctx, *key),
        Commands::Stats => cmd_stats(&ctx),
        Commands::Groups => cmd_groups(&ctx),
        Commands::Search { term } => {
            let rt = Runtime::new()?;
            cmd_search(&rt, &ctx, &term.join(" "))
        }
        Commands::Enrich { id, term, pick } => {
            let rt = Runtime::new()?;
            cmd_enrich(&rt, &ctx, id, term.as_deref(), *pick)
        }
        Commands::Edit {
            id,
            artist,
            title,
            duration,
        } => cmd_edit(&ctx, id, artist.as_deref(), title.as_deref(), duration.as_deref()),
        Commands::Images { id, action } => cmd_images(&ctx, id, action),
        Commands::Export { id, path } => cmd_export(&ctx, id, path),
        Commands::Import { id, path } => cmd_import(&ctx, id, path),
        Commands::Play { id } => cmd_play(&ctx, id),
        Commands::Preview { id } => cmd_preview(&ctx, id),
        Commands::Config { save } => cmd_config(&ctx, *save),
    }
}

/// Show (and optionally save) the active configuration
fn cmd_config(ctx: &Context, save: bool) -> anyhow::Result<()> {
    println!("Library file: {}", ctx.library_path.display());
    println!();
    print!("{}", toml::to_string_pretty(&ctx.config)?);

    if save {
        let path = config::save(&ctx.config)?;
        println!();
        println!("✓ Config saved to {}", path.display());
    }
    Ok(())
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Find a track by full id or unique id prefix.
pub(crate) fn find_track(store: &LibraryStore, id: &str) -> Result<TrackRecord> {
    let id = id.trim();
    if let Ok(parsed) = id.parse::<TrackId>() {
        return store
            .get(parsed)
            .cloned()
            .ok_or_else(|| Error::track_not_found(id));
    }

    let needle = id.to_lowercase();
    let mut matches = store
        .tracks()
        .iter()
        .filter(|t| !needle.is_empty() && t.id.to_string().starts_with(&needle));
    match (matches.next(), matches.next()) {
        (Some(track), None) => Ok(track.clone()),
        _ => Err(Error::track_not_found(id)),
    }
}

/// Short id shown in listings.
pub(crate) fn short_id(id: TrackId) -> String {
    id.to_string().chars().take(8).collect()
}

/// Print tracks one per line with a short id.
pub(crate) fn print_tracks(tracks: &[TrackRecord]) {
    if tracks.is_empty() {
        println!("(no tracks)");
        return;
    }
    for track in tracks {
        let marker = if track.has_file() { "♪" } else { " " };
        println!("{} {} {}", short_id(track.id), marker, track);
    }
}
