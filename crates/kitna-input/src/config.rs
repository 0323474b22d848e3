use std::path::{Path, PathBuf};

use kitna_core::Catalog;

use crate::{InputError, Result};

/// Environment variable naming a catalog file, used when no path is passed explicitly.
pub const CATALOG_ENV: &str = "KITNA_CATALOG";

/// An explicit path wins over `KITNA_CATALOG`. Empty values are ignored.
pub fn resolve_catalog_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(CATALOG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Load the catalog at `path`, or the built-in catalog when there is none.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    let raw = std::fs::read_to_string(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let catalog = Catalog::from_json(&raw).map_err(|e| InputError::Catalog {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "using custom catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_means_builtin() {
        assert_eq!(load_catalog(None).unwrap(), Catalog::builtin());
    }

    #[test]
    fn explicit_path_wins() {
        let p = PathBuf::from("/tmp/explicit.json");
        assert_eq!(resolve_catalog_path(Some(&p)), Some(p));
    }

    #[test]
    fn custom_catalog_loads_from_disk() {
        let path = std::env::temp_dir().join(format!("kitna-catalog-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{
                "text": [{"id": "in-house", "name": "In-house", "provider": "Us", "input_price": 0.0001}],
                "voice": [{"id": "dictate", "name": "Dictate", "provider": "Us", "input_price": 0.01, "unit": "second"}]
            }"#,
        )
        .unwrap();
        let catalog = load_catalog(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(catalog.text[0].id, "in-house");
        assert_eq!(catalog.voice[0].display_price, "$0.01/second");
    }

    #[test]
    fn corrupt_catalog_fails_loudly() {
        let path = std::env::temp_dir().join(format!("kitna-bad-catalog-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{
                "text": [{"id": "a", "name": "A", "provider": "Us", "input_price": 0.1}],
                "voice": [{"id": "b", "name": "B", "provider": "Us", "input_price": 0.1, "unit": "lightyear"}]
            }"#,
        )
        .unwrap();
        let err = load_catalog(Some(&path)).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, InputError::Catalog { .. }));
        assert!(err.to_string().contains("lightyear"));
    }
}
