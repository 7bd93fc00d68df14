//! Test utilities and fixtures for track-shelf tests.
//!
//! This module provides common test helpers and mock factories to reduce
//! boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use track_shelf::test_utils::{temp_library, mock_draft};
//!
//! #[test]
//! fn test_something() {
//!     let (mut store, _dir) = temp_library();
//!     store.add(mock_draft("Adele", "Hello", 4.5)).unwrap();
//!     // ... test logic
//! }
//! ```

use tempfile::TempDir;

use crate::library::LibraryStore;
use crate::model::{NewTrack, TrackId, TrackRecord};

/// Opens an empty library backed by a file in a temporary directory.
///
/// The file does not exist until the first mutation. Keep the `TempDir`
/// alive for the duration of your test.
///
/// ```ignore
/// let (store, _dir) = temp_library();
/// // Library file is deleted when _dir goes out of scope
/// ```
pub fn temp_library() -> (LibraryStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let store =
        LibraryStore::open(dir.path().join("library.json")).expect("Failed to open test library");
    (store, dir)
}

/// Creates a manual-entry draft.
pub fn mock_draft(artist: &str, title: &str, duration_minutes: f64) -> NewTrack {
    NewTrack::manual(artist, title, duration_minutes)
}

/// Creates a TrackRecord with a fresh id and no enrichment data.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let track = TrackRecord {
///     file_path: "/music/song.mp3".to_string(),
///     ..mock_track("Adele", "Hello", 4.5)
/// };
/// ```
pub fn mock_track(artist: &str, title: &str, duration_minutes: f64) -> TrackRecord {
    TrackRecord {
        id: TrackId::new(),
        artist: artist.to_string(),
        title: title.to_string(),
        duration_minutes,
        ..TrackRecord::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_library_starts_empty() {
        let (store, dir) = temp_library();
        assert!(store.is_empty());
        assert!(store.path().starts_with(dir.path()));
    }

    #[test]
    fn test_mock_track_defaults() {
        let track = mock_track("Test Artist", "Test Track", 3.0);
        assert_eq!(track.artist, "Test Artist");
        assert_eq!(track.title, "Test Track");
        assert!(track.file_path.is_empty());
        assert!(track.images.is_empty());
        assert!(track.validate().is_ok());
    }

    #[test]
    fn test_mock_draft_is_valid() {
        assert!(mock_draft("A", "B", 1.5).into_record().is_ok());
    }
}
