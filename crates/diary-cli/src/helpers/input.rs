//! Entry body and confirmation input.

use std::io::{self, IsTerminal, Read, Write};
use std::process::Command;

use dialoguer::Confirm;
use tempfile::NamedTempFile;

use crate::errors::CliError;

/// Reject blank values for required text such as titles.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CliError> {
    if value.trim().is_empty() {
        return Err(CliError::invalid_input(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Ask a yes/no question; defaults to no.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

/// Read entry body from --body flag, stdin, or $EDITOR.
pub fn read_entry_body(
    interactive: bool,
    body: Option<String>,
    editor_override: Option<&str>,
    initial_body: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(value) = body {
        if value.trim().is_empty() {
            return Err(CliError::invalid_input("--body cannot be empty").into());
        }
        return Ok(value);
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim_end().to_string();
        if trimmed.is_empty() {
            return Err(CliError::invalid_input("No input provided on stdin").into());
        }
        return Ok(trimmed);
    }

    if !interactive {
        return Err(CliError::invalid_input("--no-input requires --body or content on stdin").into());
    }

    read_body_from_editor(editor_override, initial_body)
}

/// Owner-only scratch file holding `initial` for the editor.
///
/// The file is removed when the handle drops.
fn editor_scratch_file(initial: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("diary_entry_")
        .suffix(".txt")
        .tempfile()
        .map_err(|e| anyhow::anyhow!("Failed to create temp file: {}", e))?;
    file.write_all(initial.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| anyhow::anyhow!("Failed to write temp file: {}", e))?;
    Ok(file)
}

/// Open $EDITOR to compose entry body.
fn read_body_from_editor(
    editor_override: Option<&str>,
    initial_body: Option<&str>,
) -> anyhow::Result<String> {
    let editor = editor_override
        .map(|value| value.to_string())
        .or_else(|| std::env::var("EDITOR").ok())
        .ok_or_else(|| {
            anyhow::anyhow!("$EDITOR is not set; use --body or pipe content via stdin")
        })?;

    let scratch = editor_scratch_file(initial_body.unwrap_or(""))?;
    let status = Command::new(&editor)
        .arg(scratch.path())
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch editor {}: {}", editor, e))?;
    if !status.success() {
        return Err(anyhow::anyhow!("Editor exited with failure"));
    }

    // Editors may replace the file, so read it back by path.
    let contents = std::fs::read_to_string(scratch.path())
        .map_err(|e| anyhow::anyhow!("Failed to read temp file: {}", e))?;
    drop(scratch);

    let trimmed = contents.trim_end().to_string();
    if trimmed.is_empty() {
        return Err(CliError::invalid_input("Entry body is empty").into());
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_flag_wins() {
        let body = read_entry_body(false, Some("from flag".to_string()), None, None).unwrap();
        assert_eq!(body, "from flag");
    }

    #[test]
    fn test_blank_body_flag_rejected() {
        let err = read_entry_body(false, Some("   ".to_string()), None, None).unwrap_err();
        assert!(err.to_string().contains("--body cannot be empty"));
    }

    #[cfg(unix)]
    #[test]
    fn test_editor_scratch_file_is_private_and_removed() {
        use std::os::unix::fs::PermissionsExt;

        let scratch = editor_scratch_file("draft").unwrap();
        let path = scratch.path().to_path_buf();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "draft");

        drop(scratch);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_editor_round_trip_keeps_initial_body() {
        let body = read_body_from_editor(Some("true"), Some("kept body\n")).unwrap();
        assert_eq!(body, "kept body");

        let err = read_body_from_editor(Some("false"), Some("x")).unwrap_err();
        assert!(err.to_string().contains("Editor exited with failure"));
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("Title", "Morning").is_ok());
        let err = require_non_empty("Title", " \t").unwrap_err();
        assert_eq!(err.to_string(), "Title cannot be empty");
    }
}
