//! Adapter layer: Convert catalog DTOs to domain models
//!
//! This is the ONLY place where catalog DTO types become domain types.

use super::dto;
use crate::enrichment::domain::CandidateResult;

/// Convert a search response to candidates, in response order.
pub fn to_candidates(response: dto::SearchResponse) -> Vec<CandidateResult> {
    response
        .results
        .unwrap_or_default()
        .into_iter()
        .map(to_candidate)
        .collect()
}

fn to_candidate(item: dto::ResultItem) -> CandidateResult {
    CandidateResult {
        track_name: item.track_name.unwrap_or_default(),
        artist_name: item.artist_name.unwrap_or_default(),
        collection_name: item.collection_name.unwrap_or_default(),
        artwork_url: item.artwork_url100.unwrap_or_default(),
        preview_url: item.preview_url.unwrap_or_default(),
    }
}
