use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde_json::{json, Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::http::state::AppState;
use crate::playback::PlaybackStatus;

/// Parse the request body as a JSON object, the way the control endpoints
/// accept it: only with a JSON content type, and only when non-empty.
/// Anything else counts as "no body".
fn json_object(headers: &HeaderMap, body: &[u8]) -> Option<Map<String, Value>> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("application/json"));
    if !is_json {
        return None;
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Ignoring malformed JSON body: {}", e);
            None
        }
    }
}

/// Accept integers, integral floats truncated toward zero, and numeric strings.
fn parse_volume(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

async fn control_pause(state: &AppState) {
    if !state.control_delay.is_zero() {
        tokio::time::sleep(state.control_delay).await;
    }
}

/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Json<PlaybackStatus> {
    Json(state.playback.status())
}

/// POST /api/play — optional body `{"track": "name"}`.
pub async fn play(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let track = json_object(&headers, &body)
        .and_then(|map| map.get("track").and_then(Value::as_str).map(str::to_string));

    let result = state.playback.play(track.as_deref());
    control_pause(&state).await;
    let track = result?;

    Ok(Json(json!({
        "status": "playing",
        "track": track,
        "message": format!("Started playing {track}"),
    })))
}

/// POST /api/pause
pub async fn pause(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let result = state.playback.pause();
    control_pause(&state).await;
    result?;

    Ok(Json(json!({
        "status": "paused",
        "message": "Playback paused",
    })))
}

/// POST /api/stop
pub async fn stop(State(state): State<AppState>) -> Json<Value> {
    state.playback.stop();
    control_pause(&state).await;

    Json(json!({
        "status": "stopped",
        "message": "Playback stopped",
    }))
}

/// POST /api/volume — body `{"volume": 0..=100}`.
pub async fn volume(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let map = json_object(&headers, &body)
        .ok_or_else(|| ApiError::BadRequest("JSON body required".to_string()))?;

    let raw = map
        .get("volume")
        .filter(|v| !v.is_null())
        .ok_or_else(|| ApiError::BadRequest("Volume parameter required".to_string()))?;

    let requested = parse_volume(raw)
        .ok_or_else(|| ApiError::BadRequest("Volume must be a number".to_string()))?;

    let result = state.playback.set_volume(requested);
    control_pause(&state).await;
    let volume = result?;

    Ok(Json(json!({
        "status": "ok",
        "volume": volume,
        "message": format!("Volume set to {volume}%"),
    })))
}

/// GET /api/tracks
pub async fn tracks(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "tracks": state.catalog.names() }))
}
