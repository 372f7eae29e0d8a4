//! AES-256-GCM sealing and opening of entry bodies.
//!
//! Records use a 16-byte nonce (GCM derives the counter block through GHASH
//! for non-96-bit nonces) and a 16-byte tag, with no associated data.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadCore, AeadInPlace, KeyInit, OsRng};
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;

use super::key::DerivedKey;
use super::record::SealedRecord;
use crate::error::{DiaryError, Result};

/// AES-256-GCM with a 128-bit nonce.
type EntryCipher = AesGcm<Aes256, U16>;

fn cipher_for(key: &DerivedKey) -> EntryCipher {
    EntryCipher::new(GenericArray::from_slice(key.as_bytes()))
}

/// Encrypt `plaintext` under `key` with a freshly generated nonce.
///
/// Two calls with the same input never produce the same record.
///
/// # Errors
///
/// Returns `DiaryError::Crypto` if the cipher rejects the input.
pub fn seal(plaintext: &[u8], key: &DerivedKey) -> Result<SealedRecord> {
    let cipher = cipher_for(key);
    let nonce = EntryCipher::generate_nonce(&mut OsRng);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(&nonce, b"", &mut buffer)
        .map_err(|e| DiaryError::Crypto(format!("Encryption failed: {}", e)))?;

    Ok(SealedRecord::new(nonce.into(), tag.into(), buffer))
}

/// Decrypt and authenticate `record` under `key`.
///
/// # Errors
///
/// Returns `DiaryError::Auth` if the tag does not verify.
pub fn open(record: &SealedRecord, key: &DerivedKey) -> Result<Vec<u8>> {
    let cipher = cipher_for(key);
    let nonce = GenericArray::from_slice(record.nonce());
    let tag = GenericArray::from_slice(record.tag());

    let mut buffer = record.ciphertext().to_vec();
    cipher
        .decrypt_in_place_detached(nonce, b"", &mut buffer, tag)
        .map_err(|_| DiaryError::Auth)?;

    Ok(buffer)
}

/// Seal UTF-8 text and return the stored hex form.
pub fn seal_text(text: &str, key: &DerivedKey) -> Result<String> {
    Ok(seal(text.as_bytes(), key)?.to_hex())
}

/// Open a stored hex record and return its text.
///
/// Every failure (bad hex, truncated record, tag mismatch, non-UTF-8 body)
/// surfaces as the same `DiaryError::Auth`.
pub fn open_text(stored: &str, key: &DerivedKey) -> Result<String> {
    let record = SealedRecord::from_hex(stored)?;
    let plaintext = open(&record, key)?;
    String::from_utf8(plaintext).map_err(|_| DiaryError::Auth)
}
