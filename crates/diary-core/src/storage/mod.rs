//! Storage layer for Diary.
//!
//! ## Architecture
//!
//! - `MetadataStore` owns `metadata.json`, the ordered index of entries
//! - `EntryRepository` owns `entries/` and keeps both artifacts in step
//! - `EntryStore` is the trait front ends program against
//!
//! ## Security
//!
//! Entry bodies never touch disk in plaintext. Titles and dates in the
//! metadata index are not encrypted.

pub mod integrity;
pub mod metadata;
pub mod repository;
pub mod traits;
pub mod types;

// Re-export public types
pub use integrity::IntegrityReport;
pub use metadata::{MetadataStore, METADATA_FILE};
pub use repository::{EntryRepository, ENTRIES_DIR};
pub use traits::EntryStore;
pub use types::{entry_filename, EntryDescriptor, MetadataDocument, ENTRY_EXTENSION};
