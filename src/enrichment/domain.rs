//! Internal domain models for catalog search.
//!
//! These types are OUR types - they don't change when the catalog API changes.
//! Catalog responses get converted into these types by the catalog adapter.

use std::fmt;

/// One catalog search hit, not yet applied to any track.
///
/// Every field is a plain string; absent upstream values become `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateResult {
    pub track_name: String,
    pub artist_name: String,
    pub collection_name: String,
    pub artwork_url: String,
    pub preview_url: String,
}

impl fmt::Display for CandidateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist_name, self.track_name)
    }
}

/// User-facing message for every non-cancel search failure.
pub const UNAVAILABLE_MESSAGE: &str =
    "Failed to search the catalog. Check your internet connection and try again.";

/// Errors that can occur during a catalog search.
///
/// Transport details are logged where they happen and never carried here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The caller fired the cancellation signal
    #[error("Search canceled")]
    Canceled,

    /// Timeout, non-success status or unreadable payload
    #[error("{0}")]
    Unavailable(String),
}

impl SearchError {
    /// The standard "search unavailable" error.
    pub fn unavailable() -> Self {
        Self::Unavailable(UNAVAILABLE_MESSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_display() {
        let candidate = CandidateResult {
            track_name: "Hello".to_string(),
            artist_name: "Adele".to_string(),
            ..Default::default()
        };
        assert_eq!(candidate.to_string(), "Adele - Hello");
    }

    #[test]
    fn test_unavailable_message_is_user_facing() {
        let msg = SearchError::unavailable().to_string();
        assert!(msg.contains("internet connection"));
    }
}
