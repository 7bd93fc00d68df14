//! Derived, read-only views over a slice of tracks.
//!
//! Everything here is pure: inputs are borrowed, outputs are fresh vectors.
//! All sorts are stable, so equal keys keep their original relative order.

use std::cmp::Ordering;

use crate::model::TrackRecord;

/// Errors from aggregate queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("No songs to analyze")]
    EmptyLibrary,
}

/// Totals over a non-empty library.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryStats {
    /// Sum of all durations in minutes
    pub total_minutes: f64,
    /// Mean duration in minutes
    pub average_minutes: f64,
    /// Longest track (first one wins on ties)
    pub longest: TrackRecord,
}

/// Track count for one artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistGroup {
    pub artist: String,
    pub count: usize,
}

/// Sort by duration, shortest first when `ascending`.
pub fn sort_by_duration(tracks: &[TrackRecord], ascending: bool) -> Vec<TrackRecord> {
    let mut sorted = tracks.to_vec();
    sorted.sort_by(|a, b| {
        let cmp = a.duration_minutes.total_cmp(&b.duration_minutes);
        if ascending { cmp } else { cmp.reverse() }
    });
    sorted
}

/// Sort by title, ignoring case.
pub fn sort_by_title(tracks: &[TrackRecord]) -> Vec<TrackRecord> {
    let mut sorted = tracks.to_vec();
    sorted.sort_by_cached_key(|t| t.title.to_lowercase());
    sorted
}

/// Case-insensitive substring match on artist or title.
///
/// A blank query returns the input unchanged.
pub fn filter_by_text(tracks: &[TrackRecord], query: &str) -> Vec<TrackRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return tracks.to_vec();
    }

    tracks
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&query) || t.artist.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Tracks strictly shorter than `threshold_minutes`.
pub fn filter_short(tracks: &[TrackRecord], threshold_minutes: f64) -> Vec<TrackRecord> {
    tracks
        .iter()
        .filter(|t| t.duration_minutes < threshold_minutes)
        .cloned()
        .collect()
}

/// Total, average and longest track.
pub fn aggregate(tracks: &[TrackRecord]) -> Result<LibraryStats, QueryError> {
    let mut iter = tracks.iter();
    let first = iter.next().ok_or(QueryError::EmptyLibrary)?;

    let mut total = first.duration_minutes;
    let mut longest = first;
    for track in iter {
        total += track.duration_minutes;
        // Strictly greater keeps the first occurrence on ties
        if track.duration_minutes.total_cmp(&longest.duration_minutes) == Ordering::Greater {
            longest = track;
        }
    }

    Ok(LibraryStats {
        total_minutes: total,
        average_minutes: total / tracks.len() as f64,
        longest: longest.clone(),
    })
}

/// Count tracks per artist, in first-seen artist order.
pub fn group_by_artist(tracks: &[TrackRecord]) -> Vec<ArtistGroup> {
    let mut groups: Vec<ArtistGroup> = Vec::new();
    for track in tracks {
        match groups.iter_mut().find(|g| g.artist == track.artist) {
            Some(group) => group.count += 1,
            None => groups.push(ArtistGroup {
                artist: track.artist.clone(),
                count: 1,
            }),
        }
    }
    groups
}
