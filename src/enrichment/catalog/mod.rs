//! Remote catalog search (iTunes Search API)
//!
//! Looks up candidate metadata for a free-text term. The request is filtered
//! server-side to songs and capped at a fixed result count.
//!
//! API docs: https://performance-partners.apple.com/search-api

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_candidates;
pub use client::CatalogClient;
