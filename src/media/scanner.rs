use std::path::Path;
use std::time::Instant;
use walkdir::WalkDir;

use crate::media::catalog::{Catalog, Track};
use crate::media::mime::AudioFormat;

/// Recursively scan `root` and return the catalog of audio files under it.
///
/// Symlinks are followed and entries are visited in file-name order so that
/// duplicate names resolve the same way on every start. A missing root or an
/// unreadable entry logs a warning and the scan continues; an empty catalog
/// is a valid result.
pub fn scan(root: &Path) -> Catalog {
    let start = Instant::now();
    let mut catalog = Catalog::new();
    let mut wav_count = 0usize;
    let mut mp3_count = 0usize;
    let mut flac_count = 0usize;

    if !root.exists() {
        tracing::warn!("Audio directory does not exist: {}", root.display());
        return catalog;
    }

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        match entry {
            Err(e) => {
                tracing::warn!("Cannot access entry: {}", e);
            }
            Ok(entry) if entry.file_type().is_file() => {
                let Some(track) = Track::from_path(entry.path()) else {
                    continue;
                };
                let format = track.format;
                let path = track.path.clone();
                if !catalog.insert(track) {
                    tracing::warn!(
                        "Duplicate track name, skipping {}",
                        path.display()
                    );
                    continue;
                }
                match format {
                    AudioFormat::Wav => wav_count += 1,
                    AudioFormat::Mp3 => mp3_count += 1,
                    AudioFormat::Flac => flac_count += 1,
                }
                tracing::debug!("indexed {}", path.display());
            }
            Ok(_) => {}
        }
    }

    tracing::info!(
        "Found {} audio files ({} wav, {} mp3, {} flac) in {:.1}s",
        catalog.len(),
        wav_count,
        mp3_count,
        flac_count,
        start.elapsed().as_secs_f64()
    );

    catalog
}
