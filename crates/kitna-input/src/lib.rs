//! Raw inputs from the outside world: typed text, voice uploads and catalog files.

pub mod config;
pub mod media;
pub mod text;

use std::path::PathBuf;
use thiserror::Error;

pub use config::{load_catalog, resolve_catalog_path, CATALOG_ENV};
pub use media::load_voice_file;
pub use text::{read_text, TextSource};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported media file {}: expected an audio or video file", .0.display())]
    UnsupportedMedia(PathBuf),

    #[error("Invalid catalog {}: {source}", path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: kitna_core::KitnaError,
    },
}

pub type Result<T> = std::result::Result<T, InputError>;

/// Shorten a path for display purposes
pub fn short_path(path: &std::path::Path) -> String {
    let home = std::env::var("HOME").unwrap_or_default();
    let s = path.to_string_lossy();
    if !home.is_empty() && s.starts_with(&home) {
        format!("~{}", &s[home.len()..])
    } else {
        s.to_string()
    }
}
