pub mod api;
pub mod index;
pub mod state;
pub mod stream;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use crate::http::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::serve_index))
        // Control API
        .route("/api/status", get(api::status))
        .route("/api/play", post(api::play))
        .route("/api/pause", post(api::pause))
        .route("/api/stop", post(api::stop))
        .route("/api/volume", post(api::volume))
        .route("/api/tracks", get(api::tracks))
        // Whole-file track delivery
        .route("/audio/stream", get(stream::audio_stream))
        // Embedded clients expect the server to close after every response.
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONNECTION,
            HeaderValue::from_static("close"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
