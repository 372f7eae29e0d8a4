use std::path::PathBuf;

use diary_core::EntryRepository;
use tracing::info;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_data_dir, write_config, DiaryConfig};
use crate::errors::CliError;
use crate::ui::kv;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}; pass --force to overwrite",
            config_path.display()
        ))
        .into());
    }

    let data_dir: PathBuf = match args.path.clone().or_else(|| ctx.cli().data_dir.clone()) {
        Some(path) => path,
        None => default_data_dir()?,
    };
    let repo = EntryRepository::open(&data_dir)?;

    let config = DiaryConfig::new(repo.root(), args.editor.clone());
    write_config(&config_path, &config)?;
    info!(config = %config_path.display(), data_dir = %data_dir.display(), "Initialized diary");

    if !ctx.quiet() {
        let ui = ctx.ui(false);
        println!("Initialized diary");
        println!("{}", kv(&ui, "Data dir", &data_dir.display().to_string()));
        println!("{}", kv(&ui, "Config", &config_path.display().to_string()));
    }
    Ok(())
}
