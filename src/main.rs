use std::sync::Arc;

use clap::Parser;

use rewind_server::{cli, config, http, media};

/// Wait for the first Ctrl+C (graceful shutdown: in-flight frames drain).
/// A second Ctrl+C during the drain force-exits.
async fn wait_for_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nrewind-server: forced exit");
            std::process::exit(1);
        }
    });
}

/// Acquire the OS hostname for the startup banner, if available.
fn get_hostname() -> Option<String> {
    hostname::get()
        .ok()
        .and_then(|os| os.into_string().ok())
        .filter(|s| !s.is_empty())
}

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
        )
        .init();

    let file_config = config::find_config_file(args.config.as_deref())
        .and_then(|path| {
            match config::load_config(&path) {
                Ok(cfg) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    Some(cfg)
                }
                Err(e) => {
                    tracing::warn!("Ignoring config file: {}", e);
                    None
                }
            }
        });

    let config = config::Config::resolve(file_config, &args);

    // Scanned exactly once; the catalog is immutable from here on.
    let catalog = Arc::new(media::scanner::scan(&config.audio_dir));
    for track in catalog.iter() {
        tracing::info!("  - {}", track.name);
    }

    let state = http::state::AppState::new(
        Arc::clone(&catalog),
        config.volume,
        config.control_delay,
    );
    let app = http::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("error: failed to bind {}: {}", addr, e);
            std::process::exit(1);
        });

    let audio_root = std::fs::canonicalize(&config.audio_dir)
        .unwrap_or_else(|_| config.audio_dir.clone());
    tracing::info!(
        "rewind-server serving {} tracks from {} on http://{}",
        catalog.len(),
        audio_root.display(),
        addr
    );
    tracing::info!("  Local: http://127.0.0.1:{}", config.port);
    if !config.is_loopback() {
        let host = get_hostname().unwrap_or_else(|| config.host.clone());
        tracing::info!("  Network: http://{}:{}", host, config.port);
    }

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
    {
        tracing::error!("HTTP server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Goodbye.");
}
