use std::io::{self, BufRead, Write};

use diary_core::api::dispatch_json;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::CheckArgs;
use crate::errors::CliError;
use crate::output::{print_report, report_json};

pub fn handle_check(ctx: &AppContext, args: &CheckArgs) -> anyhow::Result<()> {
    let repo = ctx.open_repository()?;
    let report = repo.check()?;

    let ui = ctx.ui(args.json);
    if ui.mode.is_json() {
        println!("{}", report_json(&report)?);
    } else if !ctx.quiet() || !report.is_clean() {
        print_report(&ui, &report);
    }

    if !report.is_clean() {
        return Err(CliError::IntegrityFailed(format!(
            "Integrity check failed: {} missing, {} orphaned, {} duplicated",
            report.missing_files.len(),
            report.orphan_files.len(),
            report.duplicate_filenames.len()
        ))
        .into());
    }
    Ok(())
}

/// Answer one JSON request per stdin line until EOF.
pub fn handle_serve_json(ctx: &AppContext) -> anyhow::Result<()> {
    let repo = ctx.open_repository()?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = dispatch_json(&repo, &line);
        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }
    debug!("Request stream closed");
    Ok(())
}
