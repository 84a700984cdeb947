//! Failure kinds reported by playback control and file streaming.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every variant is recoverable and user-facing; the message is relayed to
/// the client verbatim.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("No tracks available")]
    NoTracksAvailable,

    #[error("Not currently playing")]
    NotPlaying,

    #[error("Volume must be between 0 and 100")]
    VolumeOutOfRange { requested: i64 },

    #[error("No track specified and none available")]
    NoTrackSpecified,

    #[error("Track '{0}' not found")]
    TrackNotFound(String),

    #[error("Could not read audio file: {source}")]
    ReadFailure {
        track: String,
        #[source]
        source: std::io::Error,
    },
}

impl PlaybackError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlaybackError::NoTracksAvailable
            | PlaybackError::NotPlaying
            | PlaybackError::VolumeOutOfRange { .. }
            | PlaybackError::NoTrackSpecified => StatusCode::BAD_REQUEST,
            PlaybackError::TrackNotFound(_) => StatusCode::NOT_FOUND,
            PlaybackError::ReadFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PlaybackError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.to_string())
    }
}

/// JSON error envelope shared by every API failure.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(json!({
        "status": "error",
        "message": message.into(),
    }));
    (status, body).into_response()
}

pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Failures of the HTTP surface: either a domain error or a malformed request
/// that never reached the playback state.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Playback(err) => err.into_response(),
            ApiError::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
