use std::path::Path;

/// Audio formats the catalog accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Flac,
}

impl AudioFormat {
    /// MIME type sent as `Content-Type` on stream frames.
    pub fn mime(self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Flac => "audio/flac",
        }
    }
}

/// Classify a file path by its extension.
///
/// Returns `None` for anything that is not `.wav`, `.mp3` or `.flac`
/// (silent skip, no logging at this layer). Extensions are matched
/// case-insensitively, so `TRACK.WAV` is accepted.
pub fn classify(path: &Path) -> Option<AudioFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();

    match ext.as_str() {
        "wav" => Some(AudioFormat::Wav),
        "mp3" => Some(AudioFormat::Mp3),
        "flac" => Some(AudioFormat::Flac),
        _ => None,
    }
}
