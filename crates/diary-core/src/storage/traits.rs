//! Entry store trait definition.
//!
//! `EntryStore` is the seam between the request/response surface and the
//! storage backend.

use super::types::EntryDescriptor;
use crate::error::Result;

/// Encrypted entry storage.
///
/// All implementations must ensure:
/// - Entry bodies are encrypted at rest under a password-derived key
/// - Each write of a single artifact is atomic
/// - Exactly one descriptor exists per stored entry
pub trait EntryStore {
    /// Encrypt `text` and store it as a new entry.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::Storage` if the entry file or the metadata
    /// document cannot be written.
    fn create(&self, title: &str, text: &str, password: &str) -> Result<EntryDescriptor>;

    /// Decrypt the entry stored under `filename`.
    ///
    /// # Errors
    ///
    /// - `DiaryError::NotFound` if no entry file exists
    /// - `DiaryError::Auth` if the password is wrong or the file is corrupted
    fn read(&self, filename: &str, password: &str) -> Result<String>;

    /// Re-encrypt an entry with new content and title.
    ///
    /// The previous content is replaced without checking `password` against
    /// it; a different password makes the entry readable only under the new
    /// one.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::NotFound` if the entry does not exist.
    fn update(&self, filename: &str, new_title: &str, new_text: &str, password: &str)
        -> Result<()>;

    /// Remove an entry and its descriptor. Deleting a missing entry succeeds.
    fn delete(&self, filename: &str) -> Result<()>;

    /// All descriptors, newest first.
    fn list(&self) -> Result<Vec<EntryDescriptor>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_store: &dyn EntryStore) {}
    }
}
