//! Consistency check between the metadata index and the entries directory.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Serialize;

use super::types::{MetadataDocument, ENTRY_EXTENSION};
use crate::error::{DiaryError, Result};

/// Differences between the index and the files on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// Entry files with no descriptor
    pub orphan_files: Vec<String>,

    /// Descriptors whose entry file is gone
    pub missing_files: Vec<String>,

    /// Filenames claimed by more than one descriptor
    pub duplicate_filenames: Vec<String>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.orphan_files.is_empty()
            && self.missing_files.is_empty()
            && self.duplicate_filenames.is_empty()
    }
}

/// Build a report for `doc` against the files in `entries_dir`.
///
/// Hidden files (in-flight temp files) and files without the entry extension
/// are ignored.
pub fn scan(doc: &MetadataDocument, entries_dir: &Path) -> Result<IntegrityReport> {
    let mut on_disk = BTreeSet::new();
    let read_dir = fs::read_dir(entries_dir).map_err(|e| {
        DiaryError::Storage(format!("Failed to list {}: {}", entries_dir.display(), e))
    })?;
    for item in read_dir {
        let item = item?;
        if !item.file_type()?.is_file() {
            continue;
        }
        let Some(name) = item.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let is_entry = !name.starts_with('.')
            && Path::new(&name)
                .extension()
                .is_some_and(|ext| ext == ENTRY_EXTENSION);
        if is_entry {
            on_disk.insert(name);
        }
    }

    let mut indexed: BTreeMap<&str, usize> = BTreeMap::new();
    for descriptor in &doc.entries {
        *indexed.entry(descriptor.filename.as_str()).or_default() += 1;
    }

    let orphan_files = on_disk
        .iter()
        .filter(|name| !indexed.contains_key(name.as_str()))
        .cloned()
        .collect();
    let missing_files = indexed
        .keys()
        .filter(|name| !on_disk.contains(**name))
        .map(|name| name.to_string())
        .collect();
    let duplicate_filenames = indexed
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(name, _)| name.to_string())
        .collect();

    Ok(IntegrityReport {
        orphan_files,
        missing_files,
        duplicate_filenames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::types::EntryDescriptor;
    use chrono::Utc;
    use tempfile::tempdir;

    #[test]
    fn test_scan_reports_each_kind() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1.diary"), "00").unwrap();
        fs::write(dir.path().join("2.diary"), "00").unwrap();
        fs::write(dir.path().join(".2.diary.123.tmp"), "00").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut doc = MetadataDocument::new();
        doc.push(EntryDescriptor::new(1, "a", Utc::now(), "1.diary"));
        doc.push(EntryDescriptor::new(3, "c", Utc::now(), "3.diary"));
        doc.push(EntryDescriptor::new(4, "c again", Utc::now(), "3.diary"));

        let report = scan(&doc, dir.path()).unwrap();
        assert_eq!(report.orphan_files, vec!["2.diary"]);
        assert_eq!(report.missing_files, vec!["3.diary"]);
        assert_eq!(report.duplicate_filenames, vec!["3.diary"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_scan_clean() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1.diary"), "00").unwrap();
        let mut doc = MetadataDocument::new();
        doc.push(EntryDescriptor::new(1, "a", Utc::now(), "1.diary"));

        assert!(scan(&doc, dir.path()).unwrap().is_clean());
    }
}
