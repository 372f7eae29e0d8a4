use diary_core::crypto::read_sealed;

use crate::app::{read_password, AppContext};
use crate::cli::{ExportArgs, ImportArgs};
use crate::helpers::require_non_empty;
use crate::output::descriptor_json;

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let repo = ctx.open_repository()?;
    repo.export(&args.filename, &args.dest)?;
    if !ctx.quiet() {
        println!("Exported {} to {}", args.filename, args.dest.display());
    }
    Ok(())
}

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    require_non_empty("Title", &args.title)?;
    let repo = ctx.open_repository()?;

    // Fail on a missing source before asking for a password.
    read_sealed(&args.src)?;
    let password = read_password(ctx.interactive(), false)?;

    let descriptor = repo.import(&args.src, &args.title, &password)?;

    if args.json {
        println!("{}", descriptor_json(&descriptor)?);
    } else if !ctx.quiet() {
        println!("Imported {} as {}", args.src.display(), descriptor.filename);
    }
    Ok(())
}
