//! Library management and playback commands.

use std::path::Path;

use crate::library::{generator, query};
use crate::model::NewTrack;
use crate::player::{self, PlaybackError, SystemOpener};

use super::{Context, SortKey, find_track, print_tracks, short_id};

/// List tracks, optionally through a query view
pub fn cmd_list(
    ctx: &Context,
    sort: Option<SortKey>,
    filter: Option<&str>,
    short_threshold: Option<f64>,
) -> anyhow::Result<()> {
    let store = ctx.open_library()?;

    let mut view = store.tracks().to_vec();
    if let Some(text) = filter {
        view = query::filter_by_text(&view, text);
    }
    if let Some(threshold) = short_threshold {
        view = query::filter_short(&view, threshold);
    }
    view = match sort {
        Some(SortKey::Duration) => query::sort_by_duration(&view, true),
        Some(SortKey::DurationDesc) => query::sort_by_duration(&view, false),
        Some(SortKey::Title) => query::sort_by_title(&view),
        None => view,
    };

    print_tracks(&view);
    if view.len() != store.len() {
        println!();
        println!("Showing {} of {} tracks", view.len(), store.len());
    }
    Ok(())
}

/// Add a manual entry
pub fn cmd_add(ctx: &Context, artist: &str, title: &str, duration: f64) -> anyhow::Result<()> {
    let mut store = ctx.open_library()?;
    let id = store.add(NewTrack::manual(artist, title, duration))?;
    println!("✓ Added {} ({})", store_line(&store, id), short_id(id));
    Ok(())
}

/// Add an entry bound to a local audio file
pub fn cmd_add_file(
    ctx: &Context,
    path: &Path,
    artist: &str,
    title: Option<&str>,
    duration: f64,
) -> anyhow::Result<()> {
    let title = match title {
        Some(t) => t.to_string(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    if !path.is_file() {
        println!("⚠ {} does not exist yet; adding it anyway", path.display());
    }

    let mut store = ctx.open_library()?;
    let draft = NewTrack::manual(artist, title, duration).with_file(path.to_string_lossy());
    let id = store.add(draft)?;
    println!("✓ Added {} ({})", store_line(&store, id), short_id(id));
    Ok(())
}

/// Remove one track
pub fn cmd_remove(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let mut store = ctx.open_library()?;
    let track = find_track(&store, id)?;
    store.remove(track.id)?;
    println!("✓ Removed {}", track);
    Ok(())
}

/// Remove every track
pub fn cmd_clear(ctx: &Context, yes: bool) -> anyhow::Result<()> {
    let mut store = ctx.open_library()?;
    if store.is_empty() {
        println!("Library is already empty.");
        return Ok(());
    }
    if !yes {
        println!(
            "This deletes ALL {} songs from {}.",
            store.len(),
            store.path().display()
        );
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }

    let count = store.len();
    store.clear()?;
    println!("✓ Deleted {} songs", count);
    Ok(())
}

/// Replace the library with generated demo tracks
pub fn cmd_generate(ctx: &Context, count: usize) -> anyhow::Result<()> {
    let mut store = ctx.open_library()?;
    let tracks = generator::generate_tracks(&mut rand::rng(), count);
    store.replace_all(tracks)?;
    println!("✓ Generated {} tracks", store.len());
    Ok(())
}

/// Reorder the stored library
pub fn cmd_sort(ctx: &Context, key: SortKey) -> anyhow::Result<()> {
    let mut store = ctx.open_library()?;
    match key {
        SortKey::Duration => store.sort_by_duration(true)?,
        SortKey::DurationDesc => store.sort_by_duration(false)?,
        SortKey::Title => store.sort_by_title()?,
    }
    print_tracks(store.tracks());
    Ok(())
}

/// Play a track's audio file
pub fn cmd_play(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let store = ctx.open_library()?;
    let track = find_track(&store, id)?;

    match player::play_track(&track, &mut SystemOpener) {
        Ok(now_playing) => {
            println!("▶ Now playing: {}", now_playing);
            Ok(())
        }
        Err(e @ (PlaybackError::NoFileAttached | PlaybackError::FileNotFound(_))) => {
            println!("✗ {}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Open a track's preview clip
pub fn cmd_preview(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let store = ctx.open_library()?;
    let track = find_track(&store, id)?;

    if player::open_preview(&track)? {
        println!("▶ Opening preview for {}", track);
    } else {
        println!("No preview available. Run `enrich` on this track first.");
    }
    Ok(())
}

fn store_line(store: &crate::library::LibraryStore, id: crate::model::TrackId) -> String {
    store.get(id).map(ToString::to_string).unwrap_or_default()
}
