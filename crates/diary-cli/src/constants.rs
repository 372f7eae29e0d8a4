//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Entry or file not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Wrong password or corrupted entry.
    pub const AUTH_FAILED: i32 = 5;

    /// Metadata index and entry files disagree.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Environment variables read by the CLI.
pub mod env {
    /// Config file override.
    pub const CONFIG: &str = "DIARY_CONFIG";

    /// Password for non-interactive use.
    pub const PASSWORD: &str = "DIARY_PASSWORD";

    /// Log filter (tracing `EnvFilter` syntax).
    pub const LOG: &str = "DIARY_LOG";
}

/// Password prompts allowed before giving up.
pub const MAX_PASSWORD_ATTEMPTS: u32 = 3;
