//! Whole-file track delivery.
//!
//! Constrained clients cannot consume chunked transfer-encoding or hold a
//! connection open, so a track is read into memory in one pass and sent as a
//! single response with an exact length. Nothing is emitted on failure.

use std::sync::Arc;

use axum::body::Bytes;

use crate::error::{PlaybackError, Result};
use crate::media::catalog::Catalog;
use crate::playback::PlaybackState;

/// One complete track payload, ready to be written as a single frame.
#[derive(Debug, Clone)]
pub struct TrackFrame {
    pub track: String,
    pub mime: &'static str,
    pub payload: Bytes,
}

impl TrackFrame {
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FileStreamer {
    catalog: Arc<Catalog>,
    playback: Arc<PlaybackState>,
}

impl FileStreamer {
    pub fn new(catalog: Arc<Catalog>, playback: Arc<PlaybackState>) -> Self {
        Self { catalog, playback }
    }

    /// Resolve the track to send: the requested name, else the current
    /// track, else the first catalog entry.
    ///
    /// The current track is read without holding the playback lock across the
    /// file read, so a concurrent control call may or may not be reflected.
    pub fn resolve(&self, requested: Option<&str>) -> Result<String> {
        if let Some(name) = requested.filter(|name| !name.is_empty()) {
            return Ok(name.to_string());
        }
        self.playback
            .current_track()
            .or_else(|| self.catalog.first().map(str::to_string))
            .ok_or(PlaybackError::NoTrackSpecified)
    }

    pub async fn stream(&self, requested: Option<&str>) -> Result<TrackFrame> {
        let name = self.resolve(requested)?;

        let Some(track) = self.catalog.get(&name) else {
            return Err(PlaybackError::TrackNotFound(name));
        };

        // The catalog is built once; the file may have gone away since.
        match tokio::fs::metadata(&track.path).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(PlaybackError::TrackNotFound(name)),
        }

        tracing::info!("Streaming audio file: {}", track.path.display());

        let payload = tokio::fs::read(&track.path).await.map_err(|source| {
            tracing::error!("Error reading {}: {}", track.path.display(), source);
            PlaybackError::ReadFailure {
                track: name.clone(),
                source,
            }
        })?;

        tracing::info!("Read {} bytes from {}", payload.len(), name);

        Ok(TrackFrame {
            track: name,
            mime: track.format.mime(),
            payload: Bytes::from(payload),
        })
    }
}
