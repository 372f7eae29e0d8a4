//! Diary CLI - a password-protected personal journal, encrypted at rest
//!
//! Thin front end over `diary-core`: every command opens the entry
//! repository, performs one operation, and prints the result.

use clap::Parser;

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use app::AppContext;
use cli::{Cli, Commands};
use commands::{
    handle_check, handle_completions, handle_delete, handle_edit, handle_export, handle_import,
    handle_init, handle_list, handle_new, handle_serve_json, handle_show,
};
use errors::exit_with;

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);

    match &cli.command {
        Commands::Init(args) => handle_init(&ctx, args),
        Commands::List(args) => handle_list(&ctx, args),
        Commands::New(args) => handle_new(&ctx, args),
        Commands::Show(args) => handle_show(&ctx, args),
        Commands::Edit(args) => handle_edit(&ctx, args),
        Commands::Delete(args) => handle_delete(&ctx, args),
        Commands::Export(args) => handle_export(&ctx, args),
        Commands::Import(args) => handle_import(&ctx, args),
        Commands::Check(args) => handle_check(&ctx, args),
        Commands::ServeJson => handle_serve_json(&ctx),
        Commands::Completions { shell } => handle_completions(*shell),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        exit_with(&err);
    }
}
