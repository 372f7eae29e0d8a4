//! # Diary Core
//!
//! Core library for Diary - a password-protected personal journal that keeps
//! every entry encrypted at rest.
//!
//! This crate provides the encrypted-record subsystem independent of any
//! front end.
//!
//! ## Architecture
//!
//! - **crypto**: Password key derivation, sealed-record codec, AES-256-GCM
//! - **storage**: Metadata index, entry repository, integrity checks
//! - **api**: Request/response surface consumed by front ends
//!
//! ## On-disk layout
//!
//! ```text
//! <data dir>/
//!   metadata.json        { "entries": [ ... ] }
//!   entries/<id>.diary   hex(nonce || tag || ciphertext)
//! ```

pub mod api;
pub mod clock;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod storage;

pub use error::{DiaryError, Result};
pub use storage::{EntryDescriptor, EntryRepository, EntryStore, MetadataDocument, MetadataStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
