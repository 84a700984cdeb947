use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use rewind_server::error::PlaybackError;
use rewind_server::http::{build_router, state::AppState};
use rewind_server::media::scanner::scan;

fn make_state(root: &Path) -> AppState {
    AppState::new(Arc::new(scan(root)), 100, Duration::ZERO)
}

/// Audio tree with two tracks: a.wav (1 KiB) and b.mp3.
fn audio_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.wav"), vec![0x52u8; 1024]).unwrap();
    fs::write(dir.path().join("b.mp3"), b"ID3 fake mp3").unwrap();
    dir
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ── GET / ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn index_lists_tracks_as_html() {
    let dir = audio_dir();
    let response = build_router(make_state(dir.path())).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let ct = response.headers().get("content-type").unwrap().to_str().unwrap().to_string();
    assert!(ct.contains("text/html"), "Expected text/html, got: {ct}");
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("<li>a.wav</li>"), "Expected track list:\n{text}");
    assert!(text.contains("Available tracks: 2"));
    assert!(text.contains("/api/status"));
}

#[tokio::test]
async fn index_escapes_track_names() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a<b>&c.wav"), b"x").unwrap();
    let response = build_router(make_state(dir.path())).oneshot(get("/")).await.unwrap();
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!text.contains("a<b>&c"), "Track name was not escaped:\n{text}");
    assert!(text.contains("a&lt;b&gt;&amp;c.wav"));
}

// ── Control API ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_reports_initial_state() {
    let dir = audio_dir();
    let response = build_router(make_state(dir.path()))
        .oneshot(get("/api/status"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("connection").unwrap(), "close");
    let json = body_json(response).await;
    assert_eq!(json["status"], "stopped");
    assert!(json["track"].is_null());
    assert_eq!(json["volume"], 100);
    assert_eq!(json["position"], 0);
    assert_eq!(json["available_tracks"], serde_json::json!(["a.wav", "b.mp3"]));
}

#[tokio::test]
async fn play_without_body_selects_first_track() {
    let dir = audio_dir();
    let state = make_state(dir.path());
    let response = build_router(state.clone()).oneshot(post_empty("/api/play")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("connection").unwrap(), "close");
    let json = body_json(response).await;
    assert_eq!(json["status"], "playing");
    assert_eq!(json["track"], "a.wav");
    assert_eq!(json["message"], "Started playing a.wav");
    assert_eq!(state.playback.current_track().as_deref(), Some("a.wav"));
}

#[tokio::test]
async fn play_with_track_body_selects_it() {
    let dir = audio_dir();
    let response = build_router(make_state(dir.path()))
        .oneshot(post_json("/api/play", r#"{"track": "b.mp3"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["track"], "b.mp3");
}

#[tokio::test]
async fn play_with_empty_catalog_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let response = build_router(make_state(dir.path()))
        .oneshot(post_empty("/api/play"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "No tracks available");
}

#[tokio::test]
async fn pause_when_not_playing_returns_400() {
    let dir = audio_dir();
    let response = build_router(make_state(dir.path()))
        .oneshot(post_empty("/api/pause"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers().get("connection").unwrap(), "close");
    assert_eq!(body_json(response).await["message"], "Not currently playing");
}

#[tokio::test]
async fn play_pause_stop_sequence() {
    let dir = audio_dir();
    let app = build_router(make_state(dir.path()));

    let response = app.clone().oneshot(post_empty("/api/play")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(post_empty("/api/pause")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "paused");

    let status = body_json(app.clone().oneshot(get("/api/status")).await.unwrap()).await;
    assert_eq!(status["status"], "paused");
    assert_eq!(status["track"], "a.wav");

    let response = app.clone().oneshot(post_empty("/api/stop")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "stopped");
    assert_eq!(json["message"], "Playback stopped");

    let status = body_json(app.oneshot(get("/api/status")).await.unwrap()).await;
    assert_eq!(status["status"], "stopped");
    assert!(status["track"].is_null());
}

#[tokio::test]
async fn volume_sets_value() {
    let dir = audio_dir();
    let response = build_router(make_state(dir.path()))
        .oneshot(post_json("/api/volume", r#"{"volume": 75}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["volume"], 75);
    assert_eq!(json["message"], "Volume set to 75%");
}

#[tokio::test]
async fn volume_accepts_numeric_string() {
    let dir = audio_dir();
    let response = build_router(make_state(dir.path()))
        .oneshot(post_json("/api/volume", r#"{"volume": "30"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["volume"], 30);
}

#[tokio::test]
async fn volume_out_of_range_returns_400_and_keeps_value() {
    let dir = audio_dir();
    let state = make_state(dir.path());
    let response = build_router(state.clone())
        .oneshot(post_json("/api/volume", r#"{"volume": 150}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Volume must be between 0 and 100");
    assert_eq!(state.playback.status().volume, 100);
}

#[tokio::test]
async fn volume_request_shape_errors() {
    let dir = audio_dir();
    let app = build_router(make_state(dir.path()));

    let cases = [
        (post_empty("/api/volume"), "JSON body required"),
        (post_json("/api/volume", "{}"), "JSON body required"),
        (post_json("/api/volume", "not json"), "JSON body required"),
        (post_json("/api/volume", r#"{"level": 5}"#), "Volume parameter required"),
        (post_json("/api/volume", r#"{"volume": null}"#), "Volume parameter required"),
        (post_json("/api/volume", r#"{"volume": "loud"}"#), "Volume must be a number"),
    ];
    for (request, message) in cases {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], message);
    }
}

#[tokio::test]
async fn tracks_lists_catalog() {
    let dir = audio_dir();
    let response = build_router(make_state(dir.path()))
        .oneshot(get("/api/tracks"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["tracks"], serde_json::json!(["a.wav", "b.mp3"]));
}

// ── GET /audio/stream ─────────────────────────────────────────────────────────

#[tokio::test]
async fn stream_sends_whole_file_in_one_frame() {
    let dir = audio_dir();
    let response = build_router(make_state(dir.path()))
        .oneshot(get("/audio/stream?track=a.wav"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert_eq!(headers.get("content-type").unwrap(), "audio/wav");
    assert_eq!(headers.get("content-length").unwrap(), "1024");
    assert_eq!(headers.get("connection").unwrap(), "close");
    assert_eq!(headers.get("cache-control").unwrap(), "no-cache");
    assert_eq!(headers.get("accept-ranges").unwrap(), "bytes");
    assert!(headers.get("transfer-encoding").is_none());

    let body = body_bytes(response).await;
    assert_eq!(body, vec![0x52u8; 1024]);
}

#[tokio::test]
async fn stream_without_track_uses_first_catalog_entry() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.wav"), b"only track").unwrap();
    let response = build_router(make_state(dir.path()))
        .oneshot(get("/audio/stream"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-length").unwrap(), "10");
    assert_eq!(body_bytes(response).await, b"only track");
}

#[tokio::test]
async fn stream_follows_current_track() {
    let dir = audio_dir();
    let app = build_router(make_state(dir.path()));
    app.clone()
        .oneshot(post_json("/api/play", r#"{"track": "b.mp3"}"#))
        .await
        .unwrap();

    let response = app.oneshot(get("/audio/stream")).await.unwrap();
    assert_eq!(response.headers().get("content-type").unwrap(), "audio/mpeg");
    assert_eq!(body_bytes(response).await, b"ID3 fake mp3");
}

#[tokio::test]
async fn stream_unknown_track_returns_404() {
    let dir = audio_dir();
    let response = build_router(make_state(dir.path()))
        .oneshot(get("/audio/stream?track=missing.wav"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers().get("connection").unwrap(), "close");
    assert_eq!(body_json(response).await["message"], "Track 'missing.wav' not found");
}

#[tokio::test]
async fn stream_with_empty_catalog_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let response = build_router(make_state(dir.path()))
        .oneshot(get("/audio/stream"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "No track specified and none available"
    );
}

#[test]
fn read_failure_maps_to_500_with_cause() {
    let err = PlaybackError::ReadFailure {
        track: "a.wav".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
    };
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.to_string().contains("permission denied"));
    assert!(std::error::Error::source(&err).is_some());
}
