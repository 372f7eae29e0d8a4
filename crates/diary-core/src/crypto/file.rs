//! Standalone `.diary` files.
//!
//! A loose diary file has the same content as an entry file (one hex sealed
//! record) but lives at any path the user picks and has no metadata.

use std::fs;
use std::io;
use std::path::Path;

use super::cipher::{open_text, seal_text};
use super::key::derive_key;
use crate::error::{DiaryError, Result};

/// Read the sealed record stored at `path` as text.
///
/// # Errors
///
/// - `DiaryError::NotFound` if nothing exists at `path`
/// - `DiaryError::Auth` if the content is not text
/// - `DiaryError::Storage` for other I/O failures
pub fn read_sealed(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DiaryError::NotFound(path.display().to_string()),
        _ => DiaryError::Storage(format!("Failed to read {}: {}", path.display(), e)),
    })?;
    String::from_utf8(bytes).map_err(|_| DiaryError::Auth)
}

/// Encrypt `text` under `password` and write it to `path`, replacing any
/// existing file.
pub fn seal_file(path: &Path, text: &str, password: &str) -> Result<()> {
    let key = derive_key(password);
    let stored = seal_text(text, &key)?;
    crate::fs::write_atomic(path, stored.as_bytes())
}

/// Decrypt the loose diary file at `path`.
///
/// # Errors
///
/// Returns `DiaryError::NotFound` if the file is missing, `DiaryError::Auth`
/// if the password is wrong or the file is corrupted.
pub fn open_file(path: &Path, password: &str) -> Result<String> {
    let stored = read_sealed(path)?;
    let key = derive_key(password);
    open_text(&stored, &key)
}
