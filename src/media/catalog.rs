use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::media::mime::AudioFormat;

/// A single discovered audio file.
#[derive(Debug, Clone)]
pub struct Track {
    /// File name as exposed to clients, e.g. "intro.wav".
    pub name: String,
    /// Path the file was discovered at. Used for the query-time presence check
    /// and for reading the payload.
    pub path: PathBuf,
    pub format: AudioFormat,
}

/// Immutable set of tracks discovered at startup, ordered by name.
///
/// Built once by the scanner, then shared behind an `Arc` and read without
/// locking for the server lifetime.
#[derive(Debug, Default)]
pub struct Catalog {
    tracks: BTreeMap<String, Track>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-resolved tracks. Later duplicates of a
    /// name are dropped.
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>) -> Self {
        let mut catalog = Self::new();
        for track in tracks {
            catalog.insert(track);
        }
        catalog
    }

    /// Insert a track unless its name is already taken. Returns false on a
    /// duplicate name; the existing entry is kept.
    pub fn insert(&mut self, track: Track) -> bool {
        if self.tracks.contains_key(&track.name) {
            return false;
        }
        self.tracks.insert(track.name.clone(), track);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Track> {
        self.tracks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tracks.contains_key(name)
    }

    /// Lexicographically first track name.
    pub fn first(&self) -> Option<&str> {
        self.tracks.keys().next().map(String::as_str)
    }

    /// Track names in lexicographic order.
    pub fn names(&self) -> Vec<String> {
        self.tracks.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Track {
    /// Build a track from a path, taking the file name as the track name.
    /// Returns None for paths without a UTF-8 file name or with an
    /// unsupported extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let format = crate::media::mime::classify(path)?;
        let name = path.file_name()?.to_str()?.to_string();
        Some(Track {
            name,
            path: path.to_path_buf(),
            format,
        })
    }
}
