use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rewind-server",
    about = "Media-control endpoint for embedded audio clients: playback state over HTTP and whole-file track delivery",
    long_about = None,
    version,
)]
pub struct Args {
    /// Directory scanned recursively for .wav, .mp3 and .flac files [default: ../test_data]
    #[arg(short, long, value_name = "DIR")]
    pub audio_dir: Option<PathBuf>,

    /// Host address to bind to [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// HTTP port to listen on [default: 8000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Initial playback volume, 0-100 [default: 100]
    #[arg(long, allow_negative_numbers = true)]
    pub volume: Option<i64>,

    /// Pause after each control response, in milliseconds [default: 100]
    #[arg(long, value_name = "MS")]
    pub control_delay_ms: Option<u64>,

    /// Path to TOML config file (overrides default search: ./rewind.toml, ~/.config/rewind/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long)]
    pub debug: bool,
}
