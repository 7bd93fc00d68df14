//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`LibraryError`], [`SearchError`],
//!   [`SessionError`], [`QueryError`], [`PlaybackError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use track_shelf::error::{Result, ResultExt};
//!
//! fn enrich(store: &mut LibraryStore, session: &EnrichmentSession) -> Result<()> {
//!     store.update(session.record()).with_context("committing enrichment")?;
//!     Ok(())
//! }
//! ```

use crate::config::ConfigError;
use crate::enrichment::{SearchError, SessionError};
use crate::library::LibraryError;
use crate::library::query::QueryError;
use crate::player::PlaybackError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Library load/persist error
    #[error(transparent)]
    Library(#[from] LibraryError),

    /// Catalog search error
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Enrichment session error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Aggregate query error
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Playback error
    #[error(transparent)]
    Playback(#[from] PlaybackError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No track with the requested id
    #[error("Track not found: {0}")]
    TrackNotFound(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a track-not-found error.
    pub fn track_not_found(id: impl Into<String>) -> Self {
        Self::TrackNotFound(id.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error is a user cancellation rather than a failure.
    pub fn is_canceled(&self) -> bool {
        match self {
            Self::Search(SearchError::Canceled) => true,
            Self::WithContext { source, .. } => source.is_canceled(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::track_not_found("1234");
        assert!(err.to_string().contains("1234"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(QueryError::EmptyLibrary).context("while computing stats");
        let msg = err.to_string();
        assert!(msg.contains("while computing stats"));
        assert!(msg.contains("No songs to analyze"));
    }

    #[test]
    fn test_canceled_is_recognised_through_context() {
        let err = Error::from(SearchError::Canceled).context("searching");
        assert!(err.is_canceled());
        assert!(!Error::from(SearchError::unavailable()).is_canceled());
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), SessionError> = Err(SessionError::NoSelection);
        let with_ctx = result.with_context("applying candidate");
        assert!(with_ctx.unwrap_err().to_string().contains("applying candidate"));
    }
}
