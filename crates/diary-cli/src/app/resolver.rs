//! Path resolution for the config file and the data directory.

use std::path::PathBuf;

use crate::config::{default_config_path, default_data_dir, DiaryConfig};
use crate::constants::env;

/// Resolve the config file path, checking `DIARY_CONFIG` first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(env::CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the data directory.
///
/// Order: `--data-dir` / `DIARY_DIR`, then the config file, then the XDG
/// data directory.
pub fn resolve_data_dir(
    flag: Option<&PathBuf>,
    config: Option<&DiaryConfig>,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.clone());
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.diary.data_dir));
    }
    default_data_dir()
}
