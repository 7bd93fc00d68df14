//! Read-only library views.

use crate::library::query::{self, QueryError};

use super::Context;

/// Show total, average and longest track
pub fn cmd_stats(ctx: &Context) -> anyhow::Result<()> {
    let store = ctx.open_library()?;

    let stats = match query::aggregate(store.tracks()) {
        Ok(stats) => stats,
        Err(QueryError::EmptyLibrary) => {
            println!("No songs to analyze.");
            return Ok(());
        }
    };

    println!("Library Statistics");
    println!("==================");
    println!("  Tracks:          {}", store.len());
    println!("  Total duration:  {:.1} min", stats.total_minutes);
    println!("  Average:         {:.2} min", stats.average_minutes);
    println!("  Longest:         {}", stats.longest);
    Ok(())
}

/// Count tracks per artist
pub fn cmd_groups(ctx: &Context) -> anyhow::Result<()> {
    let store = ctx.open_library()?;
    let groups = query::group_by_artist(store.tracks());

    if groups.is_empty() {
        println!("(no tracks)");
        return Ok(());
    }

    let width = groups.iter().map(|g| g.artist.chars().count()).max().unwrap_or(0);
    for group in &groups {
        println!("  {:<width$}  {}", group.artist, group.count, width = width);
    }
    Ok(())
}
