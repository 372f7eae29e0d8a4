//! Password key derivation.
//!
//! Entries written by earlier releases were keyed as follows, and the scheme
//! is kept so those entries still open:
//!
//! 1. SHA-256 over the UTF-8 password bytes
//! 2. standard (padded) base64 encoding of the 32-byte digest
//! 3. the first 32 ASCII characters of that encoding are the key bytes
//!
//! There is no salt and no work factor. Every password, including the empty
//! string, maps to exactly one key.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use zeroize::{ZeroizeOnDrop, Zeroizing};

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// A cryptographic key derived from a password.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the entry key for `password`.
///
/// # Examples
///
/// ```
/// use diary_core::crypto::derive_key;
///
/// let key = derive_key("pw123");
/// assert_eq!(key.as_bytes(), b"I9R0Ra37iZF4m0Wba6G5dNcn0xCqnYC3");
/// ```
pub fn derive_key(password: &str) -> DerivedKey {
    let digest = Sha256::digest(password.as_bytes());
    // 32 digest bytes always encode to 44 characters.
    let encoded = Zeroizing::new(STANDARD.encode(digest));

    let mut key = [0u8; KEY_LENGTH];
    key.copy_from_slice(&encoded.as_bytes()[..KEY_LENGTH]);
    DerivedKey::from_bytes(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive_key("test-password");
        let key2 = derive_key("test-password");

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            derive_key("pw123").as_bytes(),
            b"I9R0Ra37iZF4m0Wba6G5dNcn0xCqnYC3"
        );
        assert_eq!(
            derive_key("").as_bytes(),
            b"47DEQpj8HBSa+/TImW+5JCeuQeRkm5NM"
        );
    }

    #[test]
    fn test_different_password_different_key() {
        let key1 = derive_key("password-one");
        let key2 = derive_key("password-two");

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_key_is_base64_alphabet() {
        let key = derive_key("ünïcödé pässwörd");
        assert_eq!(key.as_bytes().len(), KEY_LENGTH);
        assert!(key
            .as_bytes()
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'+' || *b == b'/'));
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key("pw123");

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("I9R0Ra37"));
    }
}
