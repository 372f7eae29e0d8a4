use diary_core::{DiaryError, EntryDescriptor, EntryRepository, EntryStore};
use tracing::debug;

use crate::app::{read_password, unlock_entry, AppContext};
use crate::cli::{DeleteArgs, EditArgs, ListArgs, NewArgs, ShowArgs};
use crate::errors::CliError;
use crate::helpers::{confirm, read_entry_body, require_non_empty};
use crate::output::{
    descriptor_json, entries_json, entry_rows, entry_with_text_json, print_entry, ENTRY_COLUMNS,
};
use crate::ui::{hint, simple_table};

fn find_descriptor(repo: &EntryRepository, filename: &str) -> anyhow::Result<EntryDescriptor> {
    repo.list()?
        .into_iter()
        .find(|e| e.filename == filename)
        .ok_or_else(|| DiaryError::NotFound(filename.to_string()).into())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let repo = ctx.open_repository()?;
    let mut entries = repo.list()?;
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    let ui = ctx.ui(args.json);
    if ui.mode.is_json() {
        println!("{}", entries_json(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        if !ctx.quiet() {
            println!("No entries yet.");
            println!("{}", hint(&ui, "diary new --title \"First entry\""));
        }
        return Ok(());
    }

    println!("{}", simple_table(&ui, &ENTRY_COLUMNS, &entry_rows(&ui, &entries)));
    Ok(())
}

pub fn handle_new(ctx: &AppContext, args: &NewArgs) -> anyhow::Result<()> {
    require_non_empty("Title", &args.title)?;
    let repo = ctx.open_repository()?;

    let body = read_entry_body(ctx.interactive(), args.body.clone(), ctx.editor()?, None)?;
    let password = read_password(ctx.interactive(), true)?;

    let descriptor = repo.create(&args.title, &body, &password)?;

    if args.json {
        println!("{}", descriptor_json(&descriptor)?);
    } else if !ctx.quiet() {
        println!("Created entry {}", descriptor.filename);
    }
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let repo = ctx.open_repository()?;
    let (text, _password) = unlock_entry(&repo, &args.filename, ctx.interactive())?;

    // Orphan files still open; they just have no title or date.
    let descriptor = match find_descriptor(&repo, &args.filename) {
        Ok(descriptor) => Some(descriptor),
        Err(err) => {
            debug!(filename = %args.filename, "No descriptor: {}", err);
            None
        }
    };

    let ui = ctx.ui(args.json);
    match (ui.mode.is_json(), descriptor) {
        (true, Some(descriptor)) => println!("{}", entry_with_text_json(&descriptor, &text)?),
        (true, None) => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "filename": args.filename,
                "text": text,
            }))?
        ),
        (false, Some(descriptor)) => print_entry(&ui, &descriptor, &text),
        (false, None) => println!("{}", text),
    }
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    if let Some(title) = args.title.as_deref() {
        require_non_empty("Title", title)?;
    }
    let repo = ctx.open_repository()?;
    let descriptor = find_descriptor(&repo, &args.filename)?;
    let title = args.title.clone().unwrap_or(descriptor.title);

    if args.force {
        let body = read_entry_body(ctx.interactive(), args.body.clone(), ctx.editor()?, None)?;
        let password = read_password(ctx.interactive(), true)?;
        repo.update(&args.filename, &title, &body, &password)?;
    } else {
        let (current, password) = unlock_entry(&repo, &args.filename, ctx.interactive())?;
        let body = read_entry_body(
            ctx.interactive(),
            args.body.clone(),
            ctx.editor()?,
            Some(&current),
        )?;
        repo.update_checked(&args.filename, &title, &body, &password)?;
    }

    if !ctx.quiet() {
        println!("Updated entry {}", args.filename);
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let repo = ctx.open_repository()?;

    if !args.yes {
        if !ctx.interactive() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation; pass --yes",
            )
            .into());
        }
        if !confirm(&format!("Delete entry {}?", args.filename))? {
            if !ctx.quiet() {
                println!("Cancelled.");
            }
            return Ok(());
        }
    }

    repo.delete(&args.filename)?;
    if !ctx.quiet() {
        println!("Deleted entry {}", args.filename);
    }
    Ok(())
}
