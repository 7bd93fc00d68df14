//! Catalog search API Data Transfer Objects
//!
//! These types match EXACTLY what the iTunes Search API returns.
//! DO NOT use these types outside the catalog module - convert to domain types.
//!
//! API Reference: https://performance-partners.apple.com/search-api
//!
//! Only the fields we map are declared; serde ignores the rest.

use serde::Deserialize;

/// Top-level search response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Number of items in `results`
    #[serde(default)]
    pub result_count: u32,
    /// Result items; may be absent or null
    #[serde(default)]
    pub results: Option<Vec<ResultItem>>,
}

/// One search hit (entity=song)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    /// Album name
    pub collection_name: Option<String>,
    /// 100x100 artwork
    pub artwork_url100: Option<String>,
    /// 30-second preview clip
    pub preview_url: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_full_result() {
        let json = r#"{
            "resultCount": 1,
            "results": [{
                "wrapperType": "track",
                "kind": "song",
                "artistId": 262836961,
                "trackId": 1051394215,
                "artistName": "Adele",
                "collectionName": "25",
                "trackName": "Hello",
                "previewUrl": "https://audio-ssl.itunes.apple.com/preview.m4a",
                "artworkUrl30": "https://is1-ssl.mzstatic.com/30x30bb.jpg",
                "artworkUrl60": "https://is1-ssl.mzstatic.com/60x60bb.jpg",
                "artworkUrl100": "https://is1-ssl.mzstatic.com/100x100bb.jpg",
                "trackTimeMillis": 295502
            }]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse result");
        assert_eq!(response.result_count, 1);

        let item = &response.results.as_ref().unwrap()[0];
        assert_eq!(item.track_name.as_deref(), Some("Hello"));
        assert_eq!(item.artist_name.as_deref(), Some("Adele"));
        assert_eq!(item.collection_name.as_deref(), Some("25"));
        assert_eq!(
            item.artwork_url100.as_deref(),
            Some("https://is1-ssl.mzstatic.com/100x100bb.jpg")
        );
        assert!(item.preview_url.is_some());
    }

    #[test]
    fn test_parse_sparse_items() {
        let json = r#"{
            "resultCount": 2,
            "results": [
                {"trackName": "Only Title"},
                {"artistName": null, "collectionName": "Album"}
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse sparse items");
        let results = response.results.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].artist_name.is_none());
        assert!(results[1].artist_name.is_none());
        assert!(results[1].track_name.is_none());
    }

    #[test]
    fn test_parse_empty_response() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"resultCount": 0, "results": []}"#).unwrap();
        assert_eq!(response.result_count, 0);
        assert!(response.results.unwrap().is_empty());
    }

    #[test]
    fn test_parse_missing_results() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_none());
    }
}
