//! Catalog search HTTP client
//!
//! One GET per search against the iTunes Search API, filtered to songs and
//! capped at the configured result count. The client is stateless; share it
//! behind an `Arc` wherever a session needs it.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{adapter, dto};
use crate::config::CatalogConfig;
use crate::enrichment::domain::{CandidateResult, SearchError};

/// User agent string sent with every request
const USER_AGENT: &str = concat!("TrackShelf/", env!("CARGO_PKG_VERSION"));

/// Catalog search API client
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
    result_limit: u32,
}

impl CatalogClient {
    /// Create a client from catalog settings.
    pub fn new(config: &CatalogConfig) -> Result<Self, SearchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                warn!(target: "enrichment::catalog", error = %e, "Failed to build HTTP client");
                SearchError::unavailable()
            })?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            result_limit: config.result_limit,
        })
    }

    /// Search the catalog for songs matching `term`.
    ///
    /// A blank term returns no candidates without touching the network.
    /// Firing `cancel` before the response arrives yields
    /// [`SearchError::Canceled`]; every other failure becomes
    /// [`SearchError::Unavailable`].
    pub async fn search(
        &self,
        term: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<CandidateResult>, SearchError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        if cancel.is_cancelled() {
            return Err(SearchError::Canceled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(target: "enrichment::catalog", term, "Search canceled");
                Err(SearchError::Canceled)
            }
            response = self.send_search_request(term) => response.map(adapter::to_candidates),
        }
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(&self, term: &str) -> Result<dto::SearchResponse, SearchError> {
        let url = search_url(&self.base_url, term, self.result_limit);
        debug!(target: "enrichment::catalog", %url, "Searching catalog");

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                warn!(target: "enrichment::catalog", term, "Catalog search timed out");
            } else {
                warn!(target: "enrichment::catalog", term, error = %e, "Catalog request failed");
            }
            SearchError::unavailable()
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                target: "enrichment::catalog",
                term,
                status = %status,
                "Catalog returned non-success status"
            );
            return Err(SearchError::unavailable());
        }

        response.json::<dto::SearchResponse>().await.map_err(|e| {
            warn!(target: "enrichment::catalog", term, error = %e, "Failed to parse catalog response");
            SearchError::unavailable()
        })
    }
}

/// Build the search URL for `term`.
pub(crate) fn search_url(base_url: &str, term: &str, limit: u32) -> String {
    format!(
        "{}/search?entity=song&limit={}&term={}",
        base_url,
        limit,
        urlencoding::encode(term.trim())
    )
}
