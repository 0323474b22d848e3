use std::io::Read;
use std::path::PathBuf;

use crate::{InputError, Result};

/// Where free text for an estimate comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

pub fn read_text(source: &TextSource) -> Result<String> {
    match source {
        TextSource::Inline(s) => Ok(s.clone()),
        TextSource::File(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| InputError::Io {
                path: path.clone(),
                source: e,
            })?;
            tracing::debug!(path = %path.display(), bytes = text.len(), "read text file");
            Ok(text)
        }
        TextSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .lock()
                .read_to_string(&mut text)
                .map_err(|e| InputError::Io {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_is_returned_verbatim() {
        let text = read_text(&TextSource::Inline("a\nb ".into())).unwrap();
        assert_eq!(text, "a\nb ");
    }

    #[test]
    fn file_text_keeps_newlines() {
        let path = std::env::temp_dir().join(format!("kitna-text-{}.txt", std::process::id()));
        std::fs::write(&path, "line one\nline two\n").unwrap();
        let text = read_text(&TextSource::File(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(text.matches('\n').count(), 2);
    }

    #[test]
    fn missing_file_names_the_path() {
        let path = PathBuf::from("/definitely/not/here.txt");
        let err = read_text(&TextSource::File(path)).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
