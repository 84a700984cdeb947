use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::http::state::AppState;
use crate::streamer::TrackFrame;

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub track: Option<String>,
}

/// Headers for a single whole-file frame: exact length, no caching, and a
/// request to close the connection once the body is written.
///
/// `Accept-Ranges: bytes` is advertised for client compatibility only. Range
/// requests are not honored; every response carries the full file.
fn frame_headers(frame: &TrackFrame) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(frame.mime));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(frame.len()));
    headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers
}

impl IntoResponse for TrackFrame {
    fn into_response(self) -> Response {
        let headers = frame_headers(&self);
        (StatusCode::OK, headers, self.payload).into_response()
    }
}

/// GET /audio/stream?track=<name>
pub async fn audio_stream(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> ApiResult<TrackFrame> {
    let frame = state.streamer.stream(query.track.as_deref()).await?;
    tracing::info!("Sending {} bytes of audio data for {}", frame.len(), frame.track);
    Ok(frame)
}
