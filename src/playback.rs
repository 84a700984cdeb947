//! Playback intent state machine.
//!
//! Tracks what the remote client has been told to do (play, pause, stop,
//! volume). No audio is decoded or rendered here.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::error::{PlaybackError, Result};
use crate::media::catalog::Catalog;

pub const MIN_VOLUME: i64 = 0;
pub const MAX_VOLUME: i64 = 100;
pub const DEFAULT_VOLUME: u8 = 100;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    Stopped,
    Playing,
    Paused,
}

impl PlaybackMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PlaybackMode::Stopped => "stopped",
            PlaybackMode::Playing => "playing",
            PlaybackMode::Paused => "paused",
        }
    }
}

/// Consistent snapshot of the playback state, taken under one lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackStatus {
    #[serde(rename = "status")]
    pub mode: PlaybackMode,
    #[serde(rename = "track")]
    pub current_track: Option<String>,
    pub volume: u8,
    pub position: u64,
    #[serde(rename = "available_tracks")]
    pub catalog: Vec<String>,
}

#[derive(Debug)]
struct Inner {
    mode: PlaybackMode,
    current_track: Option<String>,
    volume: u8,
    /// Byte offset into the current track. Reset on track change and stop,
    /// never advanced since nothing is decoded.
    position: u64,
}

/// Shared playback state. One instance per process, created by the entry
/// point and handed to every handler through `AppState`.
///
/// Every operation holds the single mutex for its whole body, so callers
/// never observe a mode/track/volume triple that was only partly updated.
#[derive(Debug)]
pub struct PlaybackState {
    catalog: Arc<Catalog>,
    inner: Mutex<Inner>,
}

impl PlaybackState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_volume(catalog, DEFAULT_VOLUME)
    }

    /// Create the initial Stopped state with a configured starting volume.
    /// Values above the maximum are clamped; config validation warns first.
    pub fn with_volume(catalog: Arc<Catalog>, volume: u8) -> Self {
        Self {
            catalog,
            inner: Mutex::new(Inner {
                mode: PlaybackMode::Stopped,
                current_track: None,
                volume: volume.min(MAX_VOLUME as u8),
                position: 0,
            }),
        }
    }

    // Each critical section leaves Inner valid before it can panic, so a
    // poisoned guard is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> PlaybackStatus {
        let inner = self.lock();
        PlaybackStatus {
            mode: inner.mode,
            current_track: inner.current_track.clone(),
            volume: inner.volume,
            position: inner.position,
            catalog: self.catalog.names(),
        }
    }

    /// Current track only, for callers that use it as a hint and do not need
    /// the full snapshot.
    pub fn current_track(&self) -> Option<String> {
        self.lock().current_track.clone()
    }

    /// Start or resume playback and return the resolved track name.
    ///
    /// A requested name that is not in the catalog is ignored: playback falls
    /// back to the current track, then to the first catalog entry.
    pub fn play(&self, track: Option<&str>) -> Result<String> {
        let mut inner = self.lock();

        let requested = track
            .filter(|name| !name.is_empty())
            .filter(|name| self.catalog.contains(name));

        let resolved = if let Some(name) = requested {
            inner.position = 0;
            name.to_string()
        } else if let Some(current) = inner.current_track.clone() {
            current
        } else if let Some(first) = self.catalog.first() {
            first.to_string()
        } else {
            return Err(PlaybackError::NoTracksAvailable);
        };

        inner.current_track = Some(resolved.clone());
        inner.mode = PlaybackMode::Playing;
        tracing::info!("Playing {}", resolved);
        Ok(resolved)
    }

    pub fn pause(&self) -> Result<()> {
        let mut inner = self.lock();
        if inner.mode != PlaybackMode::Playing {
            return Err(PlaybackError::NotPlaying);
        }
        inner.mode = PlaybackMode::Paused;
        tracing::info!("Paused");
        Ok(())
    }

    pub fn stop(&self) {
        let mut inner = self.lock();
        inner.mode = PlaybackMode::Stopped;
        inner.current_track = None;
        inner.position = 0;
        tracing::info!("Stopped");
    }

    /// Set the volume. Out-of-range values are rejected, never clamped.
    pub fn set_volume(&self, volume: i64) -> Result<u8> {
        let mut inner = self.lock();
        if !(MIN_VOLUME..=MAX_VOLUME).contains(&volume) {
            return Err(PlaybackError::VolumeOutOfRange { requested: volume });
        }
        inner.volume = volume as u8;
        tracing::info!("Volume set to {}%", inner.volume);
        Ok(inner.volume)
    }
}
