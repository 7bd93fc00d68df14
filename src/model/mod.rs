//! Core data model for the track library.
//!
//! Defines [`TrackRecord`], the single persisted entity, and [`NewTrack`],
//! the caller-supplied draft that [`crate::library::LibraryStore::add`]
//! turns into a record.
//!
//! # Wire format
//!
//! Records serialize to JSON with PascalCase keys:
//! - `Id`, `Artist`, `Title`, `Duration`, `FilePath`
//! - `AlbumName`, `PreviewUrl`, `ArtworkUrl`, `Images`
//!
//! Every field has a default so older or hand-edited files still load, and
//! the text and image fields read an explicit `null` as empty.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque, immutable track identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(Uuid);

impl TrackId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TrackId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// One library entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TrackRecord {
    /// Assigned at creation, never changed afterwards
    pub id: TrackId,
    /// Artist display name
    #[serde(deserialize_with = "null_as_default")]
    pub artist: String,
    /// Track title
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Length in minutes (e.g. 3.5)
    #[serde(rename = "Duration")]
    pub duration_minutes: f64,
    /// Local audio file; empty means no playable file attached
    #[serde(deserialize_with = "null_as_default")]
    pub file_path: String,
    /// Album name from enrichment
    #[serde(deserialize_with = "null_as_default")]
    pub album_name: String,
    /// Remote preview clip URL from enrichment
    #[serde(deserialize_with = "null_as_default")]
    pub preview_url: String,
    /// Artwork URL from enrichment
    #[serde(deserialize_with = "null_as_default")]
    pub artwork_url: String,
    /// User-curated image paths/URLs, no duplicates
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

/// Read an explicit JSON `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Default for TrackRecord {
    fn default() -> Self {
        Self {
            id: TrackId::new(),
            artist: String::new(),
            title: String::new(),
            duration_minutes: 0.0,
            file_path: String::new(),
            album_name: String::new(),
            preview_url: String::new(),
            artwork_url: String::new(),
            images: Vec::new(),
        }
    }
}

impl TrackRecord {
    /// Whether a local audio file is bound to this record.
    pub fn has_file(&self) -> bool {
        !self.file_path.trim().is_empty()
    }

    /// Check the record-level invariants (non-blank names, positive duration).
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.artist, &self.title, self.duration_minutes)
    }
}

impl fmt::Display for TrackRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({:.1} min)",
            self.artist, self.title, self.duration_minutes
        )
    }
}

/// Draft for a new library entry. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrack {
    pub artist: String,
    pub title: String,
    pub duration_minutes: f64,
    /// Empty for manual or generated entries
    pub file_path: String,
}

impl NewTrack {
    /// Draft without an attached file.
    pub fn manual(artist: impl Into<String>, title: impl Into<String>, duration_minutes: f64) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            duration_minutes,
            file_path: String::new(),
        }
    }

    /// Attach a local audio file to the draft.
    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.file_path = path.into();
        self
    }

    /// Validate and turn the draft into a record with a fresh id.
    pub fn into_record(self) -> Result<TrackRecord, String> {
        validate_fields(&self.artist, &self.title, self.duration_minutes)?;
        Ok(TrackRecord {
            id: TrackId::new(),
            artist: self.artist.trim().to_string(),
            title: self.title.trim().to_string(),
            duration_minutes: self.duration_minutes,
            file_path: self.file_path,
            ..TrackRecord::default()
        })
    }
}

fn validate_fields(artist: &str, title: &str, duration_minutes: f64) -> Result<(), String> {
    if artist.trim().is_empty() {
        return Err("artist must not be empty".to_string());
    }
    if title.trim().is_empty() {
        return Err("title must not be empty".to_string());
    }
    if !duration_minutes.is_finite() || duration_minutes <= 0.0 {
        return Err(format!(
            "duration must be a positive number of minutes, got {}",
            duration_minutes
        ));
    }
    Ok(())
}
