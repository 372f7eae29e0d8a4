//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use diary_core::DiaryError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Entry or file not found
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong password, corrupted entry, too many attempts)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Integrity check found problems
    IntegrityFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::IntegrityFailed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and optional hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Map a core error to its CLI counterpart, if it has one.
    ///
    /// Storage and cipher failures have no dedicated exit code.
    pub fn from_core(err: &DiaryError) -> Option<Self> {
        match err {
            DiaryError::NotFound(name) => Some(CliError::not_found(
                format!("Entry not found: {}", name),
                "Hint: Run `diary list` to see entry filenames.",
            )),
            DiaryError::Auth => Some(CliError::auth_failed(
                "Incorrect password or corrupted entry.",
            )),
            DiaryError::InvalidInput(message) => Some(CliError::invalid_input(message.clone())),
            DiaryError::Storage(_) | DiaryError::Crypto(_) => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

/// Print `err` and exit with the code matching its cause.
pub fn exit_with(err: &anyhow::Error) -> ! {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        cli_err.exit()
    }
    if let Some(cli_err) = err.downcast_ref::<DiaryError>().and_then(CliError::from_core) {
        cli_err.exit()
    }
    eprintln!("Error: {:#}", err);
    std::process::exit(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_exit_codes() {
        let not_found = CliError::from_core(&DiaryError::NotFound("1.diary".into())).unwrap();
        assert_eq!(not_found.exit_code(), exit_codes::NOT_FOUND);
        assert!(not_found.to_string().contains("1.diary"));

        let auth = CliError::from_core(&DiaryError::Auth).unwrap();
        assert_eq!(auth.exit_code(), exit_codes::AUTH_FAILED);

        assert!(CliError::from_core(&DiaryError::Storage("disk full".into())).is_none());
    }

    #[test]
    fn test_auth_hint_rendered() {
        let err = CliError::auth_failed_with_hint("Too many attempts.", "Hint: check caps lock");
        assert_eq!(err.to_string(), "Too many attempts.\nHint: check caps lock");
    }
}
