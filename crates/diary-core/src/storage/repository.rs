//! File-per-entry repository.
//!
//! Each entry is one hex sealed record under `entries/`, indexed by the
//! metadata document. Every single write is atomic, but an entry file and its
//! descriptor are written separately: a failure between the two leaves an
//! orphan that [`EntryRepository::check`] reports.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info, warn};

use super::integrity::{scan, IntegrityReport};
use super::metadata::MetadataStore;
use super::traits::EntryStore;
use super::types::{entry_filename, EntryDescriptor, MetadataDocument};
use crate::clock::{Clock, SystemClock};
use crate::crypto::{derive_key, open_text, read_sealed, seal_text};
use crate::error::{DiaryError, Result};
use crate::fs::{remove_if_exists, write_atomic};

/// Directory holding entry files inside the data directory.
pub const ENTRIES_DIR: &str = "entries";

/// Diary storage rooted at one data directory.
pub struct EntryRepository {
    root: PathBuf,
    entries_dir: PathBuf,
    metadata: MetadataStore,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for EntryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryRepository")
            .field("root", &self.root)
            .finish()
    }
}

impl EntryRepository {
    /// Open (and initialize if needed) the data directory at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_clock(root, Arc::new(SystemClock))
    }

    /// Open with a custom time source.
    pub fn open_with_clock(root: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let metadata = MetadataStore::open(&root)?;
        let entries_dir = root.join(ENTRIES_DIR);
        fs::create_dir_all(&entries_dir).map_err(|e| {
            DiaryError::Storage(format!(
                "Failed to create entries directory {}: {}",
                entries_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            root,
            entries_dir,
            metadata,
            clock,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries_dir(&self) -> &Path {
        &self.entries_dir
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    /// Path of the entry file for `filename`.
    ///
    /// Returns `None` unless `filename` is a plain file name, so callers can
    /// never reach outside `entries/`.
    pub fn entry_path(&self, filename: &str) -> Option<PathBuf> {
        if !is_plain_filename(filename) {
            return None;
        }
        Some(self.entries_dir.join(filename))
    }

    fn existing_entry_path(&self, filename: &str) -> Result<PathBuf> {
        self.entry_path(filename)
            .filter(|path| path.is_file())
            .ok_or_else(|| DiaryError::NotFound(filename.to_string()))
    }

    fn now(&self) -> DateTime<Utc> {
        // Stored timestamps carry millisecond precision.
        self.clock.now().trunc_subsecs(3)
    }

    /// Pick a timestamp id whose filename is free in both the index and
    /// the entries directory.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::Storage` if the index already holds the largest
    /// representable id.
    fn allocate_id(&self, doc: &MetadataDocument, now_millis: i64) -> Result<i64> {
        let exhausted = || DiaryError::Storage("entry id space exhausted".to_string());
        let mut id = match doc.max_id() {
            Some(last) if last >= now_millis => last.checked_add(1).ok_or_else(exhausted)?,
            _ => now_millis,
        };
        loop {
            let filename = entry_filename(id);
            if !doc.contains(&filename) && !self.entries_dir.join(&filename).exists() {
                return Ok(id);
            }
            id = id.checked_add(1).ok_or_else(exhausted)?;
        }
    }

    /// Like [`EntryStore::update`], but first proves `password` opens the
    /// current content.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::Auth` and leaves the entry untouched if the
    /// password does not open it.
    pub fn update_checked(
        &self,
        filename: &str,
        new_title: &str,
        new_text: &str,
        password: &str,
    ) -> Result<()> {
        self.read(filename, password)?;
        self.update(filename, new_title, new_text, password)
    }

    /// Copy an entry's sealed record to `dest` as a standalone `.diary` file.
    ///
    /// The content stays encrypted under the entry's password.
    pub fn export(&self, filename: &str, dest: &Path) -> Result<()> {
        let path = self.existing_entry_path(filename)?;
        let stored = read_sealed(&path)?;
        write_atomic(dest, stored.as_bytes())?;
        info!(filename, dest = %dest.display(), "Exported entry");
        Ok(())
    }

    /// Register a standalone `.diary` file as a new entry.
    ///
    /// The file must open under `password`; it is re-sealed with a fresh
    /// nonce before it is stored.
    pub fn import(&self, src: &Path, title: &str, password: &str) -> Result<EntryDescriptor> {
        let stored = read_sealed(src)?;
        let text = open_text(&stored, &derive_key(password))?;
        let descriptor = self.create(title, &text, password)?;
        info!(src = %src.display(), filename = %descriptor.filename, "Imported entry");
        Ok(descriptor)
    }

    /// Compare the metadata index with the entries directory.
    pub fn check(&self) -> Result<IntegrityReport> {
        let doc = self.metadata.load()?;
        let report = scan(&doc, &self.entries_dir)?;
        if !report.is_clean() {
            warn!(
                orphan_files = report.orphan_files.len(),
                missing_files = report.missing_files.len(),
                duplicate_filenames = report.duplicate_filenames.len(),
                "Metadata and entry files disagree"
            );
        }
        Ok(report)
    }
}

impl EntryStore for EntryRepository {
    fn create(&self, title: &str, text: &str, password: &str) -> Result<EntryDescriptor> {
        let key = derive_key(password);
        let stored = seal_text(text, &key)?;

        let mut doc = self.metadata.load()?;
        let now = self.now();
        let id = self.allocate_id(&doc, now.timestamp_millis())?;
        let filename = entry_filename(id);

        write_atomic(&self.entries_dir.join(&filename), stored.as_bytes())?;

        let descriptor = EntryDescriptor::new(id, title, now, filename);
        doc.push(descriptor.clone());
        if let Err(err) = self.metadata.save(&doc) {
            warn!(filename = %descriptor.filename, "Entry file written but metadata save failed");
            return Err(err);
        }

        info!(filename = %descriptor.filename, "Created entry");
        Ok(descriptor)
    }

    fn read(&self, filename: &str, password: &str) -> Result<String> {
        let path = self.existing_entry_path(filename)?;
        let stored = match read_sealed(&path) {
            Err(DiaryError::NotFound(_)) => return Err(DiaryError::NotFound(filename.to_string())),
            other => other?,
        };
        let text = open_text(&stored, &derive_key(password));
        if text.is_err() {
            debug!(filename, "Entry did not open");
        }
        text
    }

    fn update(
        &self,
        filename: &str,
        new_title: &str,
        new_text: &str,
        password: &str,
    ) -> Result<()> {
        let path = self.existing_entry_path(filename)?;
        let mut doc = self.metadata.load()?;
        if !doc.contains(filename) {
            // Orphan file: refuse rather than rewrite content nothing indexes.
            return Err(DiaryError::NotFound(format!(
                "{} has no metadata descriptor",
                filename
            )));
        }

        let stored = seal_text(new_text, &derive_key(password))?;
        write_atomic(&path, stored.as_bytes())?;

        let now = self.now();
        if let Some(descriptor) = doc.find_mut(filename) {
            descriptor.title = new_title.to_string();
            descriptor.modified = Some(now);
        }
        if let Err(err) = self.metadata.save(&doc) {
            warn!(filename, "Entry file rewritten but metadata save failed");
            return Err(err);
        }

        info!(filename, "Updated entry");
        Ok(())
    }

    fn delete(&self, filename: &str) -> Result<()> {
        let Some(path) = self.entry_path(filename) else {
            debug!(filename, "Ignoring delete of invalid filename");
            return Ok(());
        };

        let removed_file = remove_if_exists(&path).map_err(|e: io::Error| {
            DiaryError::Storage(format!("Failed to remove {}: {}", path.display(), e))
        })?;

        let mut doc = self.metadata.load()?;
        let removed_descriptors = doc.remove(filename);
        if removed_descriptors > 0 {
            self.metadata.save(&doc)?;
        }

        if removed_file || removed_descriptors > 0 {
            info!(filename, "Deleted entry");
        } else {
            debug!(filename, "Delete found nothing to remove");
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<EntryDescriptor>> {
        self.metadata.list_descending()
    }
}

fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use tempfile::tempdir;

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    fn repo_with_clock(root: &Path, start: &str) -> (EntryRepository, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(at(start)));
        let repo = EntryRepository::open_with_clock(root, clock.clone()).unwrap();
        (repo, clock)
    }

    #[test]
    fn test_open_creates_layout() {
        let dir = tempdir().unwrap();
        let repo = EntryRepository::open(dir.path().join("diary")).unwrap();

        assert!(repo.entries_dir().is_dir());
        assert!(repo.metadata().path().is_file());
    }

    #[test]
    fn test_create_uses_timestamp_id() {
        let dir = tempdir().unwrap();
        let (repo, _clock) = repo_with_clock(dir.path(), "2024-01-01T00:00:00.250Z");

        let descriptor = repo.create("Diary 1", "Hello world", "pw123").unwrap();

        assert_eq!(descriptor.id, 1704067200250);
        assert_eq!(descriptor.filename, "1704067200250.diary");
        assert_eq!(descriptor.date, at("2024-01-01T00:00:00.250Z"));
        assert!(descriptor.modified.is_none());
    }

    #[test]
    fn test_same_millisecond_creates_unique_filenames() {
        let dir = tempdir().unwrap();
        let (repo, _clock) = repo_with_clock(dir.path(), "2024-01-01T00:00:00Z");

        let first = repo.create("a", "one", "pw").unwrap();
        let second = repo.create("b", "two", "pw").unwrap();
        let third = repo.create("c", "three", "pw").unwrap();

        assert_ne!(first.filename, second.filename);
        assert_ne!(second.filename, third.filename);
        assert_eq!(second.id, first.id + 1);
        assert_eq!(third.id, first.id + 2);
    }

    #[test]
    fn test_allocate_skips_stray_file() {
        let dir = tempdir().unwrap();
        let (repo, _clock) = repo_with_clock(dir.path(), "2024-01-01T00:00:00Z");
        let now = at("2024-01-01T00:00:00Z").timestamp_millis();
        fs::write(repo.entries_dir().join(entry_filename(now)), "stray").unwrap();

        let descriptor = repo.create("a", "one", "pw").unwrap();
        assert_eq!(descriptor.id, now + 1);
    }

    #[test]
    fn test_update_sets_title_and_modified() {
        let dir = tempdir().unwrap();
        let (repo, clock) = repo_with_clock(dir.path(), "2024-01-01T00:00:00Z");
        let created = repo.create("T1", "body1", "pw").unwrap();

        clock.set(at("2024-01-02T08:00:00Z"));
        repo.update(&created.filename, "T2", "body2", "pw").unwrap();

        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "T2");
        assert_eq!(listed[0].date, created.date);
        assert_eq!(listed[0].modified, Some(at("2024-01-02T08:00:00Z")));
        assert_eq!(repo.read(&created.filename, "pw").unwrap(), "body2");
    }

    #[test]
    fn test_update_orphan_file_refused() {
        let dir = tempdir().unwrap();
        let repo = EntryRepository::open(dir.path()).unwrap();
        let path = repo.entries_dir().join("1.diary");
        fs::write(&path, "00").unwrap();

        let result = repo.update("1.diary", "t", "text", "pw");
        assert!(matches!(result, Err(DiaryError::NotFound(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "00");
    }

    #[test]
    fn test_update_checked_rejects_wrong_password() {
        let dir = tempdir().unwrap();
        let repo = EntryRepository::open(dir.path()).unwrap();
        let created = repo.create("T1", "keep me", "right").unwrap();

        let result = repo.update_checked(&created.filename, "T2", "lost", "wrong");
        assert!(matches!(result, Err(DiaryError::Auth)));
        assert_eq!(repo.read(&created.filename, "right").unwrap(), "keep me");
        assert_eq!(repo.list().unwrap()[0].title, "T1");
    }

    #[test]
    fn test_path_traversal_is_not_found() {
        let dir = tempdir().unwrap();
        let repo = EntryRepository::open(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("secret.diary"), "00").unwrap();

        for name in ["../secret.diary", "..", ".", "", "a/b.diary"] {
            assert!(
                matches!(repo.read(name, "pw"), Err(DiaryError::NotFound(_))),
                "{:?} should not resolve",
                name
            );
        }
        repo.delete("../secret.diary").unwrap();
        assert!(dir.path().join("secret.diary").exists());
    }

    #[test]
    fn test_delete_missing_file_still_drops_descriptor() {
        let dir = tempdir().unwrap();
        let repo = EntryRepository::open(dir.path()).unwrap();
        let created = repo.create("T1", "text", "pw").unwrap();
        fs::remove_file(repo.entries_dir().join(&created.filename)).unwrap();

        repo.delete(&created.filename).unwrap();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_export_and_import() {
        let dir = tempdir().unwrap();
        let repo = EntryRepository::open(dir.path().join("data")).unwrap();
        let created = repo.create("Trip", "We went north.", "pw").unwrap();

        let loose = dir.path().join("trip.diary");
        repo.export(&created.filename, &loose).unwrap();
        assert_eq!(
            crate::crypto::open_file(&loose, "pw").unwrap(),
            "We went north."
        );

        let other = EntryRepository::open(dir.path().join("other")).unwrap();
        assert!(matches!(
            other.import(&loose, "Trip", "nope"),
            Err(DiaryError::Auth)
        ));
        assert!(other.list().unwrap().is_empty());

        let imported = other.import(&loose, "Trip", "pw").unwrap();
        assert_eq!(other.read(&imported.filename, "pw").unwrap(), "We went north.");
    }

    #[test]
    fn test_export_missing_entry() {
        let dir = tempdir().unwrap();
        let repo = EntryRepository::open(dir.path()).unwrap();
        let result = repo.export("nope.diary", &dir.path().join("out.diary"));
        assert!(matches!(result, Err(DiaryError::NotFound(_))));
    }
}
