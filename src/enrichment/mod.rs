//! Track enrichment - looks up catalog metadata and applies it to tracks.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types for candidates and search errors
//! - **API DTOs** (`catalog/dto.rs`) - Exact API response shapes
//! - **Adapter** - Converts DTOs to domain models
//! - **Client** - HTTP client for the catalog search API
//! - **Traits** - Seams for injecting the client and mocking it in tests
//! - **Session** - The per-track interactive workflow
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{CatalogClient, EnrichmentSession};
//!
//! let client = Arc::new(CatalogClient::new(&config.catalog)?);
//! let mut session = EnrichmentSession::new(track.clone(), client);
//!
//! if let Some(pending) = session.start_search(&session.suggested_term()) {
//!     let completion = pending.run().await;
//!     session.finish_search(completion);
//! }
//! session.select(0);
//! session.apply_selected()?;
//! store.update(session.record())?;
//! ```

pub mod catalog;
pub mod domain;
pub mod session;
pub mod traits;

pub use catalog::CatalogClient;
pub use domain::{CandidateResult, SearchError};
pub use session::{
    EnrichmentSession, PendingSearch, SearchCompletion, SearchHandle, SessionError, SessionState,
};
pub use traits::CatalogSearch;
