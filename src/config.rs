use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::playback::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_AUDIO_DIR: &str = "../test_data";
const DEFAULT_CONTROL_DELAY_MS: u64 = 100;

#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    pub audio_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Wide enough to hold any TOML integer, so a bad volume is reported on
    /// its own instead of failing the whole file.
    pub volume: Option<i64>,
    pub control_delay_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub audio_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub volume: u8,
    pub control_delay: Duration,
    pub debug: bool,
}

impl Config {
    pub fn resolve(file: Option<FileConfig>, args: &crate::cli::Args) -> Self {
        let file = file.unwrap_or_default();
        let volume = args
            .volume
            .or(file.volume)
            .map_or(DEFAULT_VOLUME, initial_volume);
        Config {
            audio_dir: args
                .audio_dir
                .clone()
                .or(file.audio_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIO_DIR)),
            host: args
                .host
                .clone()
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            volume,
            control_delay: Duration::from_millis(
                args.control_delay_ms
                    .or(file.control_delay_ms)
                    .unwrap_or(DEFAULT_CONTROL_DELAY_MS),
            ),
            debug: args.debug,
        }
    }

    pub fn is_loopback(&self) -> bool {
        self.host
            .parse::<std::net::IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(self.host == "localhost")
    }
}

/// Validate a configured starting volume. Out-of-range values warn and fall
/// back to the default rather than being clamped.
fn initial_volume(requested: i64) -> u8 {
    match u8::try_from(requested) {
        Ok(v) if (MIN_VOLUME..=MAX_VOLUME).contains(&requested) => v,
        _ => {
            tracing::warn!(
                "Initial volume {} out of range ({}-{}), using {}",
                requested,
                MIN_VOLUME,
                MAX_VOLUME,
                DEFAULT_VOLUME
            );
            DEFAULT_VOLUME
        }
    }
}

/// Config locations searched when none is given, in priority order.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("rewind.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("rewind").join("config.toml"));
    }
    paths
}

pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_owned()),
        None => config_search_paths().into_iter().find(|p| p.is_file()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}
