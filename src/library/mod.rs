//! The authoritative track library and its JSON persistence.
//!
//! [`LibraryStore`] owns the ordered list of [`TrackRecord`]s. Every mutating
//! call rewrites the whole library file before returning; there are no
//! partial or append writes. Derived views (sorting, filtering, stats) live
//! in [`query`] and never touch the stored order, except for the explicit
//! `sort_*` actions on the store.

pub mod generator;
pub mod query;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::model::{NewTrack, TrackId, TrackRecord};

/// Errors raised by the library store.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// The library file exists but could not be parsed
    #[error("Library file {path} is corrupt: {message}")]
    CorruptLibraryData { path: PathBuf, message: String },

    /// A draft failed validation
    #[error("Invalid track: {0}")]
    InvalidTrack(String),

    /// The library file could not be read or written
    #[error("Failed to persist library to {path}: {message}")]
    Persist { path: PathBuf, message: String },
}

/// Ordered, file-backed collection of tracks.
#[derive(Debug)]
pub struct LibraryStore {
    path: PathBuf,
    tracks: Vec<TrackRecord>,
}

impl LibraryStore {
    /// Open the library at `path`.
    ///
    /// A missing file yields an empty library. A file that exists but does
    /// not parse fails with [`LibraryError::CorruptLibraryData`]; the file is
    /// left untouched so the caller can decide what to do with it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let path = path.into();
        let tracks = read_library(&path)?;
        info!(target: "library::store", path = %path.display(), count = tracks.len(), "Library loaded");
        Ok(Self { path, tracks })
    }

    /// Re-read the file from disk.
    ///
    /// On failure the in-memory library is kept as it was.
    pub fn reload(&mut self) -> Result<(), LibraryError> {
        let tracks = read_library(&self.path)?;
        self.tracks = tracks;
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All tracks in stored order.
    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Look up a track by id.
    pub fn get(&self, id: TrackId) -> Option<&TrackRecord> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Validate `draft`, append it with a fresh id and persist.
    pub fn add(&mut self, draft: NewTrack) -> Result<TrackId, LibraryError> {
        let record = draft.into_record().map_err(LibraryError::InvalidTrack)?;
        let id = record.id;
        debug!(target: "library::store", %id, track = %record, "Adding track");
        self.tracks.push(record);
        self.save()?;
        Ok(id)
    }

    /// Remove the track with `id`.
    ///
    /// An unknown id is not an error. The file is rewritten either way.
    /// Returns whether a track was removed.
    pub fn remove(&mut self, id: TrackId) -> Result<bool, LibraryError> {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        let removed = self.tracks.len() != before;
        if !removed {
            debug!(target: "library::store", %id, "Remove requested for unknown id");
        }
        self.save()?;
        Ok(removed)
    }

    /// Remove every track and persist.
    ///
    /// Callers holding a "current selection" must drop it themselves.
    pub fn clear(&mut self) -> Result<(), LibraryError> {
        self.tracks.clear();
        self.save()
    }

    /// Replace the whole library (generation, bulk import) and persist.
    pub fn replace_all(&mut self, records: Vec<TrackRecord>) -> Result<(), LibraryError> {
        self.tracks = records;
        self.save()
    }

    /// Commit an edited copy of an existing track (enrichment apply).
    ///
    /// Returns `false` without writing if no track has that id.
    pub fn update(&mut self, record: &TrackRecord) -> Result<bool, LibraryError> {
        let Some(slot) = self.tracks.iter_mut().find(|t| t.id == record.id) else {
            warn!(target: "library::store", id = %record.id, "Update for unknown track ignored");
            return Ok(false);
        };
        *slot = record.clone();
        self.save()?;
        Ok(true)
    }

    /// Reorder the stored sequence by duration and persist.
    pub fn sort_by_duration(&mut self, ascending: bool) -> Result<(), LibraryError> {
        self.tracks = query::sort_by_duration(&self.tracks, ascending);
        self.save()
    }

    /// Reorder the stored sequence by title and persist.
    pub fn sort_by_title(&mut self) -> Result<(), LibraryError> {
        self.tracks = query::sort_by_title(&self.tracks);
        self.save()
    }

    /// Serialize the whole library to disk.
    ///
    /// Writes to a sibling temp file then renames it over the target.
    fn save(&self) -> Result<(), LibraryError> {
        write_json(&self.path, &self.tracks).map_err(|message| LibraryError::Persist {
            path: self.path.clone(),
            message,
        })?;
        debug!(target: "library::store", path = %self.path.display(), count = self.tracks.len(), "Library saved");
        Ok(())
    }
}

fn read_library(path: &Path) -> Result<Vec<TrackRecord>, LibraryError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(target: "library::store", path = %path.display(), "No library file, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            warn!(target: "library::store", path = %path.display(), error = %e, "Library file unreadable");
            return Err(LibraryError::Persist {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
    };

    // An empty file is what a crashed first save leaves behind.
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Option<Vec<TrackRecord>>>(&contents)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            warn!(target: "library::store", path = %path.display(), error = %e, "Library file is corrupt");
            LibraryError::CorruptLibraryData {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })
}

/// Pretty-print `value` as JSON and atomically replace `path` with it.
pub(crate) fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| format!("create {}: {}", dir.display(), e))?;
    }

    let contents = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;

    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    let temp_path = PathBuf::from(temp_path);

    fs::write(&temp_path, contents).map_err(|e| format!("write {}: {}", temp_path.display(), e))?;
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        format!("rename {} to {}: {}", temp_path.display(), path.display(), e)
    })
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(String, String, f64),
        /// Remove the track at this index (modulo len), or an unknown id
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            ("[A-Za-z ]{0,4}[A-Za-z]", "[A-Za-z0-9 ]{0,6}[a-z]", 1u32..200)
                .prop_map(|(a, t, tenths)| Op::Add(a, t, f64::from(tenths) / 10.0)),
            (0usize..10).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Reloading the persisted file yields exactly the in-memory library
        #[test]
        fn persisted_library_round_trips(ops in prop::collection::vec(op(), 0..20)) {
            let dir = tempfile::tempdir().unwrap();
            let mut store = LibraryStore::open(dir.path().join("library.json")).unwrap();

            for op in ops {
                match op {
                    Op::Add(artist, title, duration) => {
                        store.add(NewTrack::manual(artist, title, duration)).unwrap();
                    }
                    Op::Remove(i) => {
                        let id = store
                            .tracks()
                            .get(i % store.len().max(1))
                            .map(|t| t.id)
                            .unwrap_or_default();
                        store.remove(id).unwrap();
                    }
                }
            }

            let reopened = LibraryStore::open(store.path()).unwrap();
            prop_assert_eq!(reopened.tracks(), store.tracks());
        }
    }
}
