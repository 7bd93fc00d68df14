//! Per-track enrichment workflow.
//!
//! An [`EnrichmentSession`] lives while one track's detail view is open. It
//! owns a working copy of the track, runs catalog searches against it,
//! applies a chosen candidate, curates the image list and exports/imports
//! the track as JSON. The caller commits the working copy back with
//! [`crate::library::LibraryStore::update`].
//!
//! # Searching
//!
//! Searches are single-flight. [`EnrichmentSession::start_search`] cancels
//! whatever is in flight and hands back a [`PendingSearch`]; the caller
//! awaits [`PendingSearch::run`] and passes the [`SearchCompletion`] to
//! [`EnrichmentSession::finish_search`]. Completions from a superseded or
//! canceled request are dropped there, so a late answer can never replace
//! newer results.
//!
//! ```ignore
//! if let Some(pending) = session.start_search("adele hello") {
//!     let completion = pending.run().await;
//!     session.finish_search(completion);
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::domain::{CandidateResult, SearchError};
use super::traits::CatalogSearch;
use crate::model::TrackRecord;

/// Errors raised by session operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Import file unreadable, malformed, or describing an invalid track
    #[error("Invalid import data: {0}")]
    InvalidImportData(String),

    /// Export file could not be written
    #[error("Failed to export track to {path}: {message}")]
    Export { path: PathBuf, message: String },

    /// Apply requested with no candidate selected
    #[error("No search result selected")]
    NoSelection,

    /// Rejected edit of a track field
    #[error("Invalid {field}: {message}")]
    InvalidField { field: &'static str, message: String },
}

/// Where the session's search workflow stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Searching,
    ResultsReady,
    Canceling,
}

/// Cancellation handle for one search request.
#[derive(Debug, Clone)]
pub struct SearchHandle {
    token: CancellationToken,
}

impl SearchHandle {
    /// Ask the request to stop. Safe to call repeatedly.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_canceled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// The single outstanding search of a session.
pub struct PendingSearch {
    generation: u64,
    term: String,
    token: CancellationToken,
    client: Arc<dyn CatalogSearch>,
}

impl PendingSearch {
    /// Handle that cancels this request.
    pub fn handle(&self) -> SearchHandle {
        SearchHandle {
            token: self.token.clone(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Perform the lookup. This is the only suspension point of a session.
    pub async fn run(self) -> SearchCompletion {
        let result = self.client.search(&self.term, &self.token).await;
        SearchCompletion {
            generation: self.generation,
            result,
        }
    }
}

/// Outcome of a [`PendingSearch`], to be fed back into its session.
#[derive(Debug)]
pub struct SearchCompletion {
    generation: u64,
    result: Result<Vec<CandidateResult>, SearchError>,
}

/// Interactive enrichment workflow bound to one track.
pub struct EnrichmentSession {
    record: TrackRecord,
    client: Arc<dyn CatalogSearch>,
    state: SessionState,
    status: String,
    results: Vec<CandidateResult>,
    selected: Option<usize>,
    images: Vec<String>,
    /// Bumped for every search started; completions must match it
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl EnrichmentSession {
    /// Open a session on a working copy of `record`.
    pub fn new(mut record: TrackRecord, client: Arc<dyn CatalogSearch>) -> Self {
        let mut images = Vec::with_capacity(record.images.len());
        for image in &record.images {
            if !images.contains(image) {
                images.push(image.clone());
            }
        }
        record.images = images.clone();

        Self {
            record,
            client,
            state: SessionState::Idle,
            status: "Ready".to_string(),
            results: Vec::new(),
            selected: None,
            images,
            generation: 0,
            in_flight: None,
        }
    }

    // ------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------

    /// The bound track, including every change made so far.
    pub fn record(&self) -> &TrackRecord {
        &self.record
    }

    /// Close the session and take the edited track.
    pub fn into_record(self) -> TrackRecord {
        self.record
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Latest status line for the presentation layer.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether a search is running or being canceled.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, SessionState::Searching | SessionState::Canceling)
    }

    pub fn results(&self) -> &[CandidateResult] {
        &self.results
    }

    pub fn selected(&self) -> Option<&CandidateResult> {
        self.selected.and_then(|i| self.results.get(i))
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Title line for the detail view.
    pub fn header_text(&self) -> String {
        format!("Editing: {} - {}", self.record.artist, self.record.title)
    }

    /// Initial search term: "artist title".
    pub fn suggested_term(&self) -> String {
        format!("{} {}", self.record.artist, self.record.title)
            .trim()
            .to_string()
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Start a new search, canceling any search still in flight.
    ///
    /// Returns `None` for a blank term; the session is then idle with a hint
    /// in its status.
    pub fn start_search(&mut self, term: &str) -> Option<PendingSearch> {
        self.abandon_in_flight();
        self.generation += 1;
        self.results.clear();
        self.selected = None;

        let term = term.trim();
        if term.is_empty() {
            self.state = SessionState::Idle;
            self.status = "Type something to search.".to_string();
            return None;
        }

        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.state = SessionState::Searching;
        self.status = "Searching catalog...".to_string();
        debug!(target: "enrichment::session", id = %self.record.id, term, generation = self.generation, "Search started");

        Some(PendingSearch {
            generation: self.generation,
            term: term.to_string(),
            token,
            client: Arc::clone(&self.client),
        })
    }

    /// Cancel the running search, if any.
    ///
    /// The session stays in `Canceling` until the matching completion is
    /// passed to [`finish_search`](Self::finish_search).
    pub fn cancel_search(&mut self) -> bool {
        if self.state != SessionState::Searching {
            return false;
        }
        if let Some(token) = &self.in_flight {
            token.cancel();
        }
        self.state = SessionState::Canceling;
        self.status = "Canceling search...".to_string();
        true
    }

    /// Apply a search completion.
    ///
    /// Returns `false` when the completion belongs to a superseded request
    /// and was discarded.
    pub fn finish_search(&mut self, completion: SearchCompletion) -> bool {
        if completion.generation != self.generation {
            debug!(
                target: "enrichment::session",
                stale = completion.generation,
                current = self.generation,
                "Discarding stale search result"
            );
            return false;
        }
        let Some(token) = self.in_flight.take() else {
            return false;
        };

        if token.is_cancelled() {
            // Whatever came back, a canceled request never produces results
            self.state = SessionState::Idle;
            self.status = "Search canceled.".to_string();
            return true;
        }

        match completion.result {
            Ok(items) => {
                self.status = if items.is_empty() {
                    "No results found.".to_string()
                } else {
                    format!("Found {} results.", items.len())
                };
                self.results = items;
                self.state = SessionState::ResultsReady;
            }
            Err(SearchError::Canceled) => {
                self.state = SessionState::Idle;
                self.status = "Search canceled.".to_string();
            }
            Err(SearchError::Unavailable(message)) => {
                warn!(target: "enrichment::session", id = %self.record.id, %message, "Search unavailable");
                self.state = SessionState::Idle;
                self.status = format!("Search unavailable: {}", message);
            }
        }
        true
    }

    /// Cancel and forget the in-flight request before replacing it.
    fn abandon_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            // Searching -> Canceling -> Idle; nothing observes the middle step
            token.cancel();
            debug!(target: "enrichment::session", generation = self.generation, "Superseded search canceled");
            self.state = SessionState::Idle;
        }
    }

    // ------------------------------------------------------------------
    // Candidates
    // ------------------------------------------------------------------

    /// Select a result by index. Out-of-range indices clear the selection.
    pub fn select(&mut self, index: usize) -> bool {
        self.selected = (index < self.results.len()).then_some(index);
        self.selected.is_some()
    }

    /// Apply the selected candidate to the bound track.
    pub fn apply_selected(&mut self) -> Result<(), SessionError> {
        let candidate = self.selected().cloned().ok_or(SessionError::NoSelection)?;
        self.apply_candidate(&candidate);
        Ok(())
    }

    /// Copy candidate metadata onto the bound track.
    ///
    /// Artist and title change only when the candidate's value is non-blank;
    /// album, preview and artwork are always taken verbatim. Identity, file
    /// and images are left alone.
    pub fn apply_candidate(&mut self, candidate: &CandidateResult) {
        if !candidate.artist_name.trim().is_empty() {
            self.record.artist = candidate.artist_name.clone();
        }
        if !candidate.track_name.trim().is_empty() {
            self.record.title = candidate.track_name.clone();
        }
        self.record.album_name = candidate.collection_name.clone();
        self.record.preview_url = candidate.preview_url.clone();
        self.record.artwork_url = candidate.artwork_url.clone();

        info!(target: "enrichment::session", id = %self.record.id, candidate = %candidate, "Candidate applied");
        self.status = "Applied selected result to song.".to_string();
    }

    // ------------------------------------------------------------------
    // Field edits
    // ------------------------------------------------------------------

    pub fn set_artist(&mut self, artist: &str) -> Result<(), SessionError> {
        if artist.trim().is_empty() {
            self.status = "Artist must not be empty.".to_string();
            return Err(SessionError::InvalidField {
                field: "artist",
                message: "must not be empty".to_string(),
            });
        }
        self.record.artist = artist.to_string();
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), SessionError> {
        if title.trim().is_empty() {
            self.status = "Title must not be empty.".to_string();
            return Err(SessionError::InvalidField {
                field: "title",
                message: "must not be empty".to_string(),
            });
        }
        self.record.title = title.to_string();
        Ok(())
    }

    /// Parse and set the duration from user text.
    pub fn set_duration_text(&mut self, text: &str) -> Result<(), SessionError> {
        match text.trim().parse::<f64>() {
            Ok(minutes) if minutes.is_finite() && minutes > 0.0 => {
                self.record.duration_minutes = minutes;
                self.status = "Duration updated.".to_string();
                Ok(())
            }
            _ => {
                self.status = "Duration must be a valid number.".to_string();
                Err(SessionError::InvalidField {
                    field: "duration",
                    message: format!("'{}' is not a positive number", text.trim()),
                })
            }
        }
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    /// Append paths not already listed, keeping first-seen order.
    ///
    /// An empty selection is a no-op. Returns how many were added.
    pub fn add_images<I, S>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        let mut touched = false;
        for path in paths {
            touched = true;
            let path = path.into();
            if path.trim().is_empty() || self.images.contains(&path) {
                continue;
            }
            self.images.push(path);
            added += 1;
        }

        if touched {
            self.sync_images();
            self.status = "Images updated.".to_string();
        }
        added
    }

    /// Remove one image. Unknown paths are ignored.
    pub fn remove_image(&mut self, path: &str) -> bool {
        let Some(index) = self.images.iter().position(|p| p == path) else {
            return false;
        };
        self.images.remove(index);
        self.sync_images();
        self.status = "Image removed.".to_string();
        true
    }

    fn sync_images(&mut self) {
        self.record.images = self.images.clone();
    }

    // ------------------------------------------------------------------
    // Export / import
    // ------------------------------------------------------------------

    /// Write the bound track to `path` as a single JSON object.
    pub fn export_to_file(&mut self, path: &Path) -> Result<(), SessionError> {
        self.sync_images();

        match crate::library::write_json(path, &self.record) {
            Ok(()) => {
                info!(target: "enrichment::session", id = %self.record.id, path = %path.display(), "Track exported");
                self.status = "Song saved to JSON.".to_string();
                Ok(())
            }
            Err(message) => {
                warn!(target: "enrichment::session", path = %path.display(), %message, "Track export failed");
                self.status = "Failed to save JSON.".to_string();
                Err(SessionError::Export {
                    path: path.to_path_buf(),
                    message,
                })
            }
        }
    }

    /// Merge a track exported earlier onto the bound track.
    ///
    /// Everything is taken from the file except `id` and `file_path`. On any
    /// error the bound track is left unchanged.
    pub fn import_from_file(&mut self, path: &Path) -> Result<(), SessionError> {
        let loaded = match read_track(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(target: "enrichment::session", path = %path.display(), error = %e, "Track import failed");
                self.status = "Failed to load JSON.".to_string();
                return Err(e);
            }
        };

        self.record.artist = loaded.artist;
        self.record.title = loaded.title;
        self.record.duration_minutes = loaded.duration_minutes;
        self.record.album_name = loaded.album_name;
        self.record.preview_url = loaded.preview_url;
        self.record.artwork_url = loaded.artwork_url;

        self.images.clear();
        for image in loaded.images {
            if !self.images.contains(&image) {
                self.images.push(image);
            }
        }
        self.sync_images();

        info!(target: "enrichment::session", id = %self.record.id, path = %path.display(), "Track imported");
        self.status = "Song loaded from JSON.".to_string();
        Ok(())
    }
}

fn read_track(path: &Path) -> Result<TrackRecord, SessionError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        SessionError::InvalidImportData(format!("could not read {}: {}", path.display(), e))
    })?;
    let loaded: TrackRecord = serde_json::from_str(&contents)
        .map_err(|e| SessionError::InvalidImportData(e.to_string()))?;
    loaded.validate().map_err(SessionError::InvalidImportData)?;
    Ok(loaded)
}
