//! Sealed record codec.
//!
//! A sealed record is `nonce (16) || tag (16) || ciphertext`, stored as a
//! lowercase hex string with nothing else in the file.

use crate::error::{DiaryError, Result};

/// Nonce length in bytes.
pub const NONCE_LENGTH: usize = 16;

/// Authentication tag length in bytes.
pub const TAG_LENGTH: usize = 16;

/// Fixed prefix preceding the ciphertext.
pub const HEADER_LENGTH: usize = NONCE_LENGTH + TAG_LENGTH;

/// One encrypted entry body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedRecord {
    nonce: [u8; NONCE_LENGTH],
    tag: [u8; TAG_LENGTH],
    ciphertext: Vec<u8>,
}

impl SealedRecord {
    pub fn new(nonce: [u8; NONCE_LENGTH], tag: [u8; TAG_LENGTH], ciphertext: Vec<u8>) -> Self {
        Self {
            nonce,
            tag,
            ciphertext,
        }
    }

    pub fn nonce(&self) -> &[u8; NONCE_LENGTH] {
        &self.nonce
    }

    pub fn tag(&self) -> &[u8; TAG_LENGTH] {
        &self.tag
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Concatenate nonce, tag and ciphertext.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LENGTH + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split raw bytes into nonce, tag and ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::Auth` if fewer than 32 bytes are supplied. Malformed
    /// input is reported exactly like a failed tag check.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LENGTH {
            return Err(DiaryError::Auth);
        }

        let (nonce, rest) = bytes.split_at(NONCE_LENGTH);
        let (tag, ciphertext) = rest.split_at(TAG_LENGTH);

        let mut nonce_arr = [0u8; NONCE_LENGTH];
        nonce_arr.copy_from_slice(nonce);
        let mut tag_arr = [0u8; TAG_LENGTH];
        tag_arr.copy_from_slice(tag);

        Ok(Self::new(nonce_arr, tag_arr, ciphertext.to_vec()))
    }

    /// Encode as the stored hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Decode the stored hex representation.
    ///
    /// Surrounding whitespace (e.g. a trailing newline added by an editor) is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::Auth` for invalid hex or a truncated record.
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.trim()).map_err(|_| DiaryError::Auth)?;
        Self::from_bytes(&bytes)
    }
}
