//! JSON metadata index.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::{EntryDescriptor, MetadataDocument};
use crate::error::{DiaryError, Result};
use crate::fs::write_atomic;

/// Name of the metadata document inside the data directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Reads and writes the metadata document.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    /// Open the store rooted at `root`, creating the directory and an empty
    /// document if they do not exist yet.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|e| {
            DiaryError::Storage(format!(
                "Failed to create data directory {}: {}",
                root.display(),
                e
            ))
        })?;

        let store = Self {
            path: root.join(METADATA_FILE),
        };
        if !store.path.exists() {
            store.initialize()?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn initialize(&self) -> Result<()> {
        info!(path = %self.path.display(), "Initializing empty metadata document");
        self.save(&MetadataDocument::new())
    }

    /// Load the whole document.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::Storage` if the document cannot be read or is not
    /// a valid `{ "entries": [...] }` object. There is no repair.
    pub fn load(&self) -> Result<MetadataDocument> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.initialize()?;
                return Ok(MetadataDocument::new());
            }
            Err(e) => {
                return Err(DiaryError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        let doc: MetadataDocument = serde_json::from_str(&contents)?;
        debug!(entries = doc.entries.len(), "Loaded metadata");
        Ok(doc)
    }

    /// Replace the document on disk.
    pub fn save(&self, doc: &MetadataDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(doc)
            .map_err(|e| DiaryError::Storage(format!("Failed to serialize metadata: {}", e)))?;
        write_atomic(&self.path, json.as_bytes())
    }

    /// All descriptors, newest first.
    pub fn list_descending(&self) -> Result<Vec<EntryDescriptor>> {
        Ok(self.load()?.sorted_descending())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use tempfile::tempdir;

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_open_creates_empty_document() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("data");

        let store = MetadataStore::open(&root).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({ "entries": [] }));
        assert!(store.load().unwrap().entries.is_empty());
    }

    #[test]
    fn test_open_keeps_existing_document() {
        let dir = tempdir().unwrap();
        let store = MetadataStore::open(dir.path()).unwrap();
        let mut doc = MetadataDocument::new();
        doc.push(EntryDescriptor::new(7, "kept", at("2024-01-01T00:00:00Z"), "7.diary"));
        store.save(&doc).unwrap();

        let reopened = MetadataStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load().unwrap(), doc);
    }

    #[test]
    fn test_list_descending_by_date() {
        let dir = tempdir().unwrap();
        let store = MetadataStore::open(dir.path()).unwrap();
        let mut doc = MetadataDocument::new();
        doc.push(EntryDescriptor::new(1, "a", at("2024-01-01T00:00:00Z"), "1.diary"));
        doc.push(EntryDescriptor::new(2, "b", at("2024-03-01T00:00:00Z"), "2.diary"));
        doc.push(EntryDescriptor::new(3, "c", at("2024-02-01T00:00:00Z"), "3.diary"));
        store.save(&doc).unwrap();

        let dates: Vec<String> = store
            .list_descending()
            .unwrap()
            .iter()
            .map(|e| e.date.format("%m-%d").to_string())
            .collect();
        assert_eq!(dates, vec!["03-01", "02-01", "01-01"]);
    }

    #[test]
    fn test_malformed_document_is_storage_error() {
        let dir = tempdir().unwrap();
        let store = MetadataStore::open(dir.path()).unwrap();

        fs::write(store.path(), "{\"entries\": 42}").unwrap();
        assert!(matches!(store.load(), Err(DiaryError::Storage(_))));

        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(DiaryError::Storage(_))));
    }

    #[test]
    fn test_load_recreates_missing_document() {
        let dir = tempdir().unwrap();
        let store = MetadataStore::open(dir.path()).unwrap();
        fs::remove_file(store.path()).unwrap();

        assert!(store.load().unwrap().entries.is_empty());
        assert!(store.path().exists());
    }
}
