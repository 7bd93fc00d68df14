//! Playback of a track's local file.
//!
//! The transport itself (decoding, output, transport controls) is an
//! external collaborator behind [`PlaybackTransport`]. This module only
//! decides whether a track is playable and hands the file over.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::model::TrackRecord;

/// Playback failures, reported distinctly to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// Manual or generated entry with no file
    #[error("This song has no audio file attached (manual/random song).")]
    NoFileAttached,

    /// The bound file is missing on this machine
    #[error("The audio file was not found on this computer: {0}")]
    FileNotFound(PathBuf),

    /// The transport refused the file
    #[error("Playback failed: {0}")]
    Transport(String),
}

/// Something that can open and start playing a local audio file.
pub trait PlaybackTransport {
    fn open_and_play(&mut self, path: &Path) -> Result<(), PlaybackError>;
}

/// Check that `track` has a playable file and start it on `transport`.
///
/// Returns the now-playing line on success.
pub fn play_track<T: PlaybackTransport + ?Sized>(
    track: &TrackRecord,
    transport: &mut T,
) -> Result<String, PlaybackError> {
    if !track.has_file() {
        return Err(PlaybackError::NoFileAttached);
    }

    let path = Path::new(&track.file_path);
    if !path.is_file() {
        return Err(PlaybackError::FileNotFound(path.to_path_buf()));
    }

    transport.open_and_play(path)?;
    info!(target: "player", id = %track.id, path = %path.display(), "Playback started");
    Ok(track.to_string())
}

/// Transport that hands files to the desktop's default audio handler.
#[derive(Debug, Default)]
pub struct SystemOpener;

impl PlaybackTransport for SystemOpener {
    fn open_and_play(&mut self, path: &Path) -> Result<(), PlaybackError> {
        let target = path.to_string_lossy();
        webbrowser::open(&target).map_err(|e| PlaybackError::Transport(e.to_string()))
    }
}

/// Open a track's remote preview clip. Blank URLs are ignored.
pub fn open_preview(track: &TrackRecord) -> Result<bool, PlaybackError> {
    let url = track.preview_url.trim();
    if url.is_empty() {
        return Ok(false);
    }
    webbrowser::open(url).map_err(|e| PlaybackError::Transport(e.to_string()))?;
    Ok(true)
}
