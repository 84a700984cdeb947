use std::sync::Arc;
use std::time::Duration;

use crate::media::catalog::Catalog;
use crate::playback::PlaybackState;
use crate::streamer::FileStreamer;

/// Shared application state injected into all route handlers via axum::extract::State.
/// The catalog is read-only after the startup scan; PlaybackState serializes
/// its own mutations.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub playback: Arc<PlaybackState>,
    pub streamer: FileStreamer,
    /// Pause before answering a control request so slow clients read the
    /// whole response before the connection closes.
    pub control_delay: Duration,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, volume: u8, control_delay: Duration) -> Self {
        let playback = Arc::new(PlaybackState::with_volume(Arc::clone(&catalog), volume));
        let streamer = FileStreamer::new(Arc::clone(&catalog), Arc::clone(&playback));
        Self {
            catalog,
            playback,
            streamer,
            control_delay,
        }
    }
}
