use serde::{Deserialize, Serialize};

use crate::calculator::{MIN_VOICE_MINUTES, TOKENS_PER_VOICE_MINUTE};
use crate::error::Result;

/// Roughly one minute of compressed audio per megabyte.
pub const BYTES_PER_VOICE_MINUTE: f64 = 1024.0 * 1024.0;

pub const MOCK_TRANSCRIPTION: &str = "This is a mock transcription from voice input.";

/// Token-equivalents for an uploaded file, judged by size alone.
///
/// This is a proxy for duration, not a measurement of it.
pub fn estimate_voice_units(file_size_bytes: u64) -> f64 {
    let minutes = (file_size_bytes as f64 / BYTES_PER_VOICE_MINUTE).max(MIN_VOICE_MINUTES);
    minutes * TOKENS_PER_VOICE_MINUTE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Classify a file extension. Anything that is not audio or video is `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "mp3" | "wav" | "m4a" | "ogg" | "oga" | "flac" | "aac" | "opus" | "weba" => {
                Some(MediaKind::Audio)
            }
            "mp4" | "mov" | "webm" | "mkv" | "avi" | "m4v" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Speech-to-text backend.
pub trait Transcriber {
    fn transcribe(&self) -> Result<String>;
}

/// Stands in for a recording session; always yields the same sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTranscriber;

impl Transcriber for MockTranscriber {
    fn transcribe(&self) -> Result<String> {
        tracing::debug!("returning mock transcription");
        Ok(MOCK_TRANSCRIPTION.to_string())
    }
}
