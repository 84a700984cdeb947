use axum::{extract::State, response::Html};
use quick_xml::escape::escape;

use crate::http::state::AppState;

const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /api/status", "Get current playback status and track information"),
    ("POST /api/play", r#"Start playback. Optional JSON body: {"track": "filename.wav"}"#),
    ("POST /api/pause", "Pause playback"),
    ("POST /api/stop", "Stop playback"),
    ("POST /api/volume", r#"Set volume. JSON body: {"volume": 75}"#),
    ("GET /api/tracks", "List available tracks"),
    ("GET /audio/stream?track=NAME", "Whole audio file in a single response (Content-Length, Connection: close)"),
];

/// GET / — human-readable status page.
pub async fn serve_index(State(state): State<AppState>) -> Html<String> {
    let status = state.playback.status();

    let tracks: String = status
        .catalog
        .iter()
        .map(|name| format!("        <li>{}</li>\n", escape(name.as_str())))
        .collect();

    let endpoints: String = ENDPOINTS
        .iter()
        .map(|(method, desc)| {
            format!(
                "    <div class=\"endpoint\">\n      <div class=\"method\">{}</div>\n      <p>{}</p>\n    </div>\n",
                escape(*method),
                escape(*desc)
            )
        })
        .collect();

    let current = status
        .current_track
        .as_deref()
        .map(|t| escape(t).into_owned())
        .unwrap_or_else(|| "none".to_string());

    Html(format!(r#"<!DOCTYPE html>
<html>
<head>
    <title>Rewind Audio Server</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; }}
        .status {{ background: #f0f8ff; padding: 20px; border-radius: 5px; margin: 20px 0; }}
        .endpoint {{ background: #f5f5f5; padding: 10px; margin: 10px 0; border-radius: 3px; }}
        .method {{ font-weight: bold; color: #0066cc; }}
    </style>
</head>
<body>
    <h1>Rewind Audio Server</h1>
    <div class="status">
        <h2>Server Status: Running</h2>
        <p>Playback: {mode} &middot; Track: {current} &middot; Volume: {volume}%</p>
        <p>Available tracks: {count}</p>
        <ul>
{tracks}        </ul>
    </div>

    <h2>API Endpoints</h2>
{endpoints}</body>
</html>
"#,
        mode = status.mode.as_str(),
        current = current,
        volume = status.volume,
        count = status.catalog.len(),
        tracks = tracks,
        endpoints = endpoints,
    ))
}
