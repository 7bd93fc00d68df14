//! Catalog search and per-track enrichment commands.

use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::enrichment::{
    CandidateResult, CatalogClient, CatalogSearch, EnrichmentSession, SearchError, SessionState,
};
use crate::error::ResultExt;
use crate::library::LibraryStore;

use super::{Context, ImageAction, find_track};

/// Search the catalog and print the hits
pub fn cmd_search(rt: &Runtime, ctx: &Context, term: &str) -> anyhow::Result<()> {
    let client = CatalogClient::new(&ctx.config.catalog)?;
    let token = CancellationToken::new();

    println!("Searching catalog for \"{}\"... (Ctrl-C to cancel)", term.trim());

    let result = rt.block_on(async {
        tokio::select! {
            result = client.search(term, &token) => result,
            Ok(()) = tokio::signal::ctrl_c() => {
                token.cancel();
                Err(SearchError::Canceled)
            }
        }
    });

    match result {
        Ok(items) if items.is_empty() => println!("No results found."),
        Ok(items) => {
            println!("Found {} results.", items.len());
            println!();
            print_candidates(&items);
        }
        Err(SearchError::Canceled) => println!("Search canceled."),
        Err(e) => println!("✗ {}", e),
    }
    Ok(())
}

/// Search for a track's metadata and optionally apply a result
pub fn cmd_enrich(
    rt: &Runtime,
    ctx: &Context,
    id: &str,
    term: Option<&str>,
    pick: Option<usize>,
) -> anyhow::Result<()> {
    let mut store = ctx.open_library()?;
    let mut session = open_session(ctx, &store, id)?;
    println!("{}", session.header_text());

    let term = term
        .map(str::to_string)
        .unwrap_or_else(|| session.suggested_term());

    rt.block_on(search_until_interrupted(&mut session, &term));
    println!("{}", session.status());

    if session.state() != SessionState::ResultsReady || session.results().is_empty() {
        return Ok(());
    }
    println!();
    print_candidates(session.results());

    let Some(number) = pick else {
        println!();
        println!("Re-run with --pick <N> to apply a result.");
        return Ok(());
    };

    if number == 0 || !session.select(number - 1) {
        anyhow::bail!(
            "No result #{} (choose 1-{})",
            number,
            session.results().len()
        );
    }
    session.apply_selected()?;
    commit(&mut store, &session)?;

    println!("✓ {}", session.status());
    println!("  {}", session.record());
    if !session.record().album_name.is_empty() {
        println!("  Album: {}", session.record().album_name);
    }
    Ok(())
}

/// Edit artist, title or duration
pub fn cmd_edit(
    ctx: &Context,
    id: &str,
    artist: Option<&str>,
    title: Option<&str>,
    duration: Option<&str>,
) -> anyhow::Result<()> {
    let mut store = ctx.open_library()?;
    let mut session = open_session(ctx, &store, id)?;

    if artist.is_none() && title.is_none() && duration.is_none() {
        println!("Nothing to change. Use --artist, --title or --duration.");
        return Ok(());
    }
    if let Some(artist) = artist {
        session.set_artist(artist)?;
    }
    if let Some(title) = title {
        session.set_title(title)?;
    }
    if let Some(duration) = duration {
        session.set_duration_text(duration)?;
    }

    commit(&mut store, &session)?;
    println!("✓ Saved {}", session.record());
    Ok(())
}

/// List, add or remove images
pub fn cmd_images(ctx: &Context, id: &str, action: &ImageAction) -> anyhow::Result<()> {
    let mut store = ctx.open_library()?;
    let mut session = open_session(ctx, &store, id)?;

    match action {
        ImageAction::List => {}
        ImageAction::Add { paths } => {
            let added = session.add_images(paths.iter().cloned());
            commit(&mut store, &session)?;
            println!("✓ Added {} image(s)", added);
        }
        ImageAction::Remove { path } => {
            if session.remove_image(path) {
                commit(&mut store, &session)?;
                println!("✓ {}", session.status());
            } else {
                println!("Image not in list: {}", path);
            }
        }
    }

    if session.images().is_empty() {
        println!("(no images)");
    }
    for (i, image) in session.images().iter().enumerate() {
        println!("  {:>2}. {}", i + 1, image);
    }
    Ok(())
}

/// Write one track to a JSON file
pub fn cmd_export(ctx: &Context, id: &str, path: &Path) -> anyhow::Result<()> {
    let store = ctx.open_library()?;
    let mut session = open_session(ctx, &store, id)?;

    session
        .export_to_file(path)
        .with_context(session.status().to_string())?;
    println!("✓ {} ({})", session.status(), path.display());
    Ok(())
}

/// Merge a track JSON file onto an existing track
pub fn cmd_import(ctx: &Context, id: &str, path: &Path) -> anyhow::Result<()> {
    let mut store = ctx.open_library()?;
    let mut session = open_session(ctx, &store, id)?;

    session
        .import_from_file(path)
        .with_context(session.status().to_string())?;
    commit(&mut store, &session)?;
    println!("✓ {}", session.status());
    println!("  {}", session.record());
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn open_session(ctx: &Context, store: &LibraryStore, id: &str) -> anyhow::Result<EnrichmentSession> {
    let track = find_track(store, id)?;
    let client: Arc<dyn CatalogSearch> = Arc::new(CatalogClient::new(&ctx.config.catalog)?);
    Ok(EnrichmentSession::new(track, client))
}

/// Write the session's working copy back to the library.
fn commit(store: &mut LibraryStore, session: &EnrichmentSession) -> anyhow::Result<()> {
    if !store.update(session.record())? {
        anyhow::bail!("Track {} was removed from the library", session.record().id);
    }
    Ok(())
}

/// Run one search, canceling it on Ctrl-C.
async fn search_until_interrupted(session: &mut EnrichmentSession, term: &str) {
    let Some(pending) = session.start_search(term) else {
        return;
    };
    println!("Searching catalog for \"{}\"... (Ctrl-C to cancel)", pending.term());
    let search = pending.run();
    tokio::pin!(search);

    let completion = tokio::select! {
        completion = &mut search => completion,
        Ok(()) = tokio::signal::ctrl_c() => {
            session.cancel_search();
            println!("{}", session.status());
            search.await
        }
    };
    session.finish_search(completion);
}

fn print_candidates(items: &[CandidateResult]) {
    for (i, item) in items.iter().enumerate() {
        if item.collection_name.is_empty() {
            println!("  {:>2}. {}", i + 1, item);
        } else {
            println!("  {:>2}. {} [{}]", i + 1, item, item.collection_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::traits::mocks::{MockCatalog, PendingCatalog, candidate};
    use crate::test_utils::mock_track;

    #[tokio::test]
    async fn test_search_until_interrupted_collects_results() {
        let client = Arc::new(MockCatalog::with_results(vec![candidate("Adele", "Hello", "25")]));
        let mut session = EnrichmentSession::new(mock_track("adele", "hello", 4.9), client);

        search_until_interrupted(&mut session, "adele hello").await;

        assert_eq!(session.state(), SessionState::ResultsReady);
        assert_eq!(session.results().len(), 1);
    }

    #[tokio::test]
    async fn test_search_until_interrupted_blank_term() {
        let client = Arc::new(PendingCatalog);
        let mut session = EnrichmentSession::new(mock_track("A", "B", 1.0), client);

        search_until_interrupted(&mut session, "   ").await;

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.status(), "Type something to search.");
    }

    #[test]
    fn test_commit_rejects_removed_track() {
        let (mut store, _dir) = crate::test_utils::temp_library();
        let client = Arc::new(MockCatalog::no_matches());
        let session = EnrichmentSession::new(mock_track("Gone", "Track", 2.0), client);
        assert!(commit(&mut store, &session).is_err());
    }
}
