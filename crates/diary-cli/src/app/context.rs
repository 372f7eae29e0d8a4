//! Application context for the Diary CLI.
//!
//! Bundles the parsed arguments with the lazily-loaded config file.

use std::io::IsTerminal;
use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use tracing::debug;

use diary_core::EntryRepository;

use crate::cli::Cli;
use crate::config::{read_config, DiaryConfig};
use crate::ui::UiContext;

use super::resolver::{resolve_config_path, resolve_data_dir};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<DiaryConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Whether prompts may be shown: stdin is a TTY and `--no-input` is off.
    pub fn interactive(&self) -> bool {
        !self.cli.no_input && std::io::stdin().is_terminal()
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&DiaryConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                debug!(path = %path.display(), "No config file");
                return Ok::<_, anyhow::Error>(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// Get the configured editor override, if any.
    pub fn editor(&self) -> anyhow::Result<Option<&str>> {
        Ok(self
            .config()?
            .and_then(|config| config.ui.editor.as_deref()))
    }

    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        resolve_data_dir(self.cli.data_dir.as_ref(), self.config()?)
    }

    /// Open the entry repository, creating the data directory if needed.
    pub fn open_repository(&self) -> anyhow::Result<EntryRepository> {
        let dir = self.data_dir()?;
        debug!(data_dir = %dir.display(), "Opening repository");
        Ok(EntryRepository::open(&dir)?)
    }

    pub fn ui(&self, json: bool) -> UiContext {
        UiContext::from_env(json)
    }
}
