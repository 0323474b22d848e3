use std::path::Path;

use kitna_core::{MediaKind, VoiceFile};

use crate::{InputError, Result};

/// Accept an audio or video upload. Only the extension and the size on disk are
/// inspected; the content is never decoded.
pub fn load_voice_file(path: &Path) -> Result<VoiceFile> {
    let kind = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(MediaKind::from_extension)
        .ok_or_else(|| InputError::UnsupportedMedia(path.to_path_buf()))?;

    let meta = std::fs::metadata(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !meta.is_file() {
        return Err(InputError::UnsupportedMedia(path.to_path_buf()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(name = %name, size_bytes = meta.len(), kind = %kind, "loaded voice file");
    Ok(VoiceFile {
        name,
        size_bytes: meta.len(),
        kind,
    })
}
