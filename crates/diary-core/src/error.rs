//! Error types for Diary core operations.
//!
//! Errors are descriptive at the core level; front ends map these to
//! user-facing messages. Authentication failures deliberately carry no
//! detail: a wrong password and a corrupted entry look the same.

use thiserror::Error;

/// Result type alias for Diary operations.
pub type Result<T> = std::result::Result<T, DiaryError>;

/// Core error type for Diary operations.
#[derive(Debug, Error)]
pub enum DiaryError {
    /// Referenced entry has no backing file
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Authenticated decryption failed (wrong password or corrupted data)
    #[error("Incorrect password or corrupted entry")]
    Auth,

    /// Entry file or metadata document could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Cipher setup failed while sealing
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Invalid request input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DiaryError {
    /// Stable machine-readable code used by the request/response surface.
    pub fn code(&self) -> &'static str {
        match self {
            DiaryError::NotFound(_) => "not_found",
            DiaryError::Auth => "auth_failed",
            DiaryError::Storage(_) | DiaryError::Crypto(_) => "storage",
            DiaryError::InvalidInput(_) => "invalid_input",
        }
    }
}

impl From<std::io::Error> for DiaryError {
    fn from(err: std::io::Error) -> Self {
        DiaryError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for DiaryError {
    fn from(err: serde_json::Error) -> Self {
        DiaryError::Storage(format!("Malformed metadata document: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_message_has_no_cause() {
        let err = DiaryError::Auth;
        assert_eq!(err.to_string(), "Incorrect password or corrupted entry");
        assert_eq!(err.code(), "auth_failed");
    }

    #[test]
    fn test_cipher_failure_reports_storage_code() {
        let err = DiaryError::Crypto("cipher rejected input".to_string());
        assert_eq!(err.code(), "storage");
        assert!(err.to_string().contains("cipher rejected input"));
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DiaryError = io.into();
        assert!(matches!(err, DiaryError::Storage(_)));
        assert_eq!(err.code(), "storage");
    }

    #[test]
    fn test_json_error_maps_to_storage() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DiaryError = json_err.into();
        assert!(err.to_string().contains("Malformed metadata document"));
    }
}
