//! Password acquisition and entry unlocking with retry.

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use diary_core::{DiaryError, EntryRepository, EntryStore};

use crate::constants::{env, MAX_PASSWORD_ATTEMPTS};
use crate::errors::CliError;

fn env_password() -> Option<Zeroizing<String>> {
    std::env::var(env::PASSWORD)
        .ok()
        .filter(|value| !value.is_empty())
        .map(Zeroizing::new)
}

fn prompt(confirm: bool) -> anyhow::Result<Zeroizing<String>> {
    let mut input = Password::new().with_prompt("Password");
    if confirm {
        input = input.with_confirmation("Confirm password", "Passwords do not match");
    }
    input
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Read a password from `DIARY_PASSWORD`, or prompt for one.
///
/// `confirm` asks twice; use it when the password will seal new content.
pub fn read_password(interactive: bool, confirm: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = env_password() {
        debug!("Using password from environment");
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No password provided and no TTY available. Set {}.",
            env::PASSWORD
        ));
    }
    prompt(confirm)
}

/// Decrypt `filename`, prompting up to three times on a wrong password.
///
/// Returns the plaintext together with the password that opened it.
pub fn unlock_entry(
    repo: &EntryRepository,
    filename: &str,
    interactive: bool,
) -> anyhow::Result<(String, Zeroizing<String>)> {
    if !repo.entry_path(filename).is_some_and(|path| path.is_file()) {
        return Err(DiaryError::NotFound(filename.to_string()).into());
    }

    if let Some(password) = env_password() {
        let text = repo.read(filename, &password)?;
        return Ok((text, password));
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No password provided and no TTY available. Set {}.",
            env::PASSWORD
        ));
    }

    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        let password = prompt(false)?;
        match repo.read(filename, &password) {
            Ok(text) => return Ok((text, password)),
            Err(DiaryError::Auth) => {
                let remaining = MAX_PASSWORD_ATTEMPTS.saturating_sub(attempts);
                if remaining == 0 {
                    return Err(CliError::auth_failed_with_hint(
                        "Too many failed password attempts.",
                        "Hint: Each entry keeps the password it was last saved with.",
                    )
                    .into());
                }
                eprintln!(
                    "Incorrect password or corrupted entry. {} attempt(s) remaining.",
                    remaining
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
}
