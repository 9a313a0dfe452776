use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CoreError, CoreErrorCode};

/// Id-to-display-name lookup loaded once from the game's language
/// file. Advisory only: it drives listings and confirmation lines,
/// never codec or mutation correctness, and an id missing from the
/// catalog must never block a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemCatalog {
    entries: BTreeMap<i16, String>,
}

/// The language file carries more sections than we need; only the
/// `treasures` array is read, and entries may carry extra keys.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    treasures: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: i16,
    name: String,
}

impl ItemCatalog {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::CatalogUnavailable,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;
        Self::from_json(&raw).map_err(|e| {
            CoreError::new(
                CoreErrorCode::CatalogUnavailable,
                format!("failed to parse {}: {e}", path.display()),
            )
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let document: CatalogDocument = serde_json::from_str(raw)?;

        let mut entries = BTreeMap::new();
        for entry in document.treasures {
            entries.insert(entry.id, entry.name);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, id: i16) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Display name for `id`, falling back to a placeholder for ids the
    /// catalog does not know.
    pub fn name(&self, id: i16) -> String {
        match self.entries.get(&id) {
            Some(name) => name.clone(),
            None => format!("unknown item {id}"),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::ItemCatalog;
    use crate::error::CoreErrorCode;

    fn temp_catalog_path(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "treasure_se_{}_{}_{}.json",
            prefix,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn from_json_reads_the_treasures_array() {
        let catalog = ItemCatalog::from_json(
            r#"{
                "treasures": [
                    { "id": 1, "name": "Copper Coin" },
                    { "id": 513, "name": "Iron Pick", "rarity": 2 }
                ],
                "dialogues": []
            }"#,
        )
        .expect("catalog JSON should parse");

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1), Some("Copper Coin"));
        assert_eq!(catalog.name(513), "Iron Pick");
    }

    #[test]
    fn name_falls_back_to_a_placeholder_for_unknown_ids() {
        let catalog = ItemCatalog::from_json(r#"{ "treasures": [] }"#)
            .expect("catalog JSON should parse");
        assert!(catalog.is_empty());
        assert_eq!(catalog.get(42), None);
        assert_eq!(catalog.name(42), "unknown item 42");
    }

    #[test]
    fn later_duplicate_ids_win() {
        let catalog = ItemCatalog::from_json(
            r#"{
                "treasures": [
                    { "id": 7, "name": "Old Name" },
                    { "id": 7, "name": "New Name" }
                ]
            }"#,
        )
        .expect("catalog JSON should parse");
        assert_eq!(catalog.get(7), Some("New Name"));
    }

    #[test]
    fn load_reports_missing_file_as_catalog_unavailable() {
        let path = temp_catalog_path("missing");
        let err = ItemCatalog::load(&path).expect_err("missing catalog should fail");
        assert_eq!(err.code, CoreErrorCode::CatalogUnavailable);
    }

    #[test]
    fn load_reports_malformed_json_as_catalog_unavailable() {
        let path = temp_catalog_path("malformed");
        fs::write(&path, b"{ not json").expect("failed to write catalog fixture");

        let err = ItemCatalog::load(&path).expect_err("malformed catalog should fail");
        assert_eq!(err.code, CoreErrorCode::CatalogUnavailable);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_reads_a_catalog_file() {
        let path = temp_catalog_path("ok");
        fs::write(&path, br#"{ "treasures": [ { "id": 3, "name": "Torch" } ] }"#)
            .expect("failed to write catalog fixture");

        let catalog = ItemCatalog::load(&path).expect("catalog file should load");
        assert_eq!(catalog.name(3), "Torch");

        let _ = fs::remove_file(&path);
    }
}
