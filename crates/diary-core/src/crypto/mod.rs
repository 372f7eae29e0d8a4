//! Cryptographic operations for Diary.
//!
//! - **key**: password → 32-byte AES key
//! - **record**: `nonce || tag || ciphertext` and its hex encoding
//! - **cipher**: AES-256-GCM seal/open
//! - **file**: standalone `.diary` files outside the data directory
//!
//! ## Security Model
//!
//! - Every seal draws a fresh random nonce from the OS
//! - Wrong passwords and corrupted records fail identically
//! - Key material is zeroized on drop
//!
//! We do NOT defend against offline brute force: the key derivation has no
//! salt or work factor, which existing data depends on.

pub mod cipher;
pub mod file;
pub mod key;
pub mod record;

pub use cipher::{open, open_text, seal, seal_text};
pub use file::{open_file, read_sealed, seal_file};
pub use key::{derive_key, DerivedKey, KEY_LENGTH};
pub use record::SealedRecord;
