//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code hands sessions a real [`CatalogClient`], while tests
//! substitute the mock implementations below.
//!
//! # Example
//!
//! ```ignore
//! use track_shelf::enrichment::traits::CatalogSearch;
//!
//! // In production code:
//! let client: Arc<dyn CatalogSearch> = Arc::new(CatalogClient::new(&config.catalog)?);
//! let session = EnrichmentSession::new(track, client);
//!
//! // In tests:
//! let session = EnrichmentSession::new(track, Arc::new(MockCatalog::with_results(...)));
//! ```
//!
//! [`CatalogClient`]: super::catalog::CatalogClient

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::domain::{CandidateResult, SearchError};

/// Trait for catalog metadata search.
///
/// Implementations must honour `cancel` and return
/// [`SearchError::Canceled`] once it fires.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search for candidates matching `term`.
    async fn search(
        &self,
        term: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<CandidateResult>, SearchError>;
}

#[async_trait]
impl CatalogSearch for super::catalog::CatalogClient {
    async fn search(
        &self,
        term: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<CandidateResult>, SearchError> {
        self.search(term, cancel).await
    }
}

/// Mock catalog clients for testing.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock catalog that returns predefined results and counts its calls.
    ///
    /// It ignores the cancellation token, so it models a response that
    /// arrives after the caller has already moved on.
    pub struct MockCatalog {
        /// Results to return from search
        pub results: Vec<CandidateResult>,
        /// Error to return (takes precedence over results)
        pub error: Option<SearchError>,
        calls: AtomicUsize,
        terms: Mutex<Vec<String>>,
    }

    impl MockCatalog {
        /// Create a mock that returns no matches.
        pub fn no_matches() -> Self {
            Self::with_results(vec![])
        }

        /// Create a mock that returns the given candidates.
        pub fn with_results(results: Vec<CandidateResult>) -> Self {
            Self {
                results,
                error: None,
                calls: AtomicUsize::new(0),
                terms: Mutex::new(Vec::new()),
            }
        }

        /// Create a mock that returns an error.
        pub fn with_error(error: SearchError) -> Self {
            Self {
                error: Some(error),
                ..Self::no_matches()
            }
        }

        /// Number of searches issued.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Terms searched, in call order.
        pub fn terms(&self) -> Vec<String> {
            self.terms.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogSearch for MockCatalog {
        async fn search(
            &self,
            term: &str,
            _cancel: &CancellationToken,
        ) -> Result<Vec<CandidateResult>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.terms.lock().unwrap().push(term.to_string());
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            Ok(self.results.clone())
        }
    }

    /// Mock catalog that never answers until canceled.
    pub struct PendingCatalog;

    #[async_trait]
    impl CatalogSearch for PendingCatalog {
        async fn search(
            &self,
            _term: &str,
            cancel: &CancellationToken,
        ) -> Result<Vec<CandidateResult>, SearchError> {
            cancel.cancelled().await;
            Err(SearchError::Canceled)
        }
    }

    /// Mock catalog that answers every search with one candidate titled
    /// after the term, ignoring cancellation.
    pub struct EchoCatalog;

    #[async_trait]
    impl CatalogSearch for EchoCatalog {
        async fn search(
            &self,
            term: &str,
            _cancel: &CancellationToken,
        ) -> Result<Vec<CandidateResult>, SearchError> {
            Ok(vec![candidate("Echo", term, "")])
        }
    }

    /// Build a candidate with the four most used fields.
    pub fn candidate(artist: &str, track: &str, album: &str) -> CandidateResult {
        CandidateResult {
            track_name: track.to_string(),
            artist_name: artist.to_string(),
            collection_name: album.to_string(),
            artwork_url: format!("https://art.example.com/{}.jpg", track),
            preview_url: format!("https://preview.example.com/{}.m4a", track),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_catalog_returns_results() {
            let mock = MockCatalog::with_results(vec![candidate("Adele", "Hello", "25")]);
            let results = mock.search("hello", &CancellationToken::new()).await.unwrap();
            assert_eq!(results.len(), 1);
            assert_eq!(mock.calls(), 1);
            assert_eq!(mock.terms(), vec!["hello".to_string()]);
        }

        #[tokio::test]
        async fn test_mock_catalog_error() {
            let mock = MockCatalog::with_error(SearchError::unavailable());
            let result = mock.search("x", &CancellationToken::new()).await;
            assert!(matches!(result, Err(SearchError::Unavailable(_))));
        }

        #[tokio::test]
        async fn test_pending_catalog_resolves_on_cancel() {
            let token = CancellationToken::new();
            token.cancel();
            let result = PendingCatalog.search("x", &token).await;
            assert_eq!(result, Err(SearchError::Canceled));
        }
    }
}
