use chrono::{DateTime, SecondsFormat, Utc};
use diary_core::storage::IntegrityReport;
use diary_core::EntryDescriptor;

use crate::ui::theme::{styled, styles};
use crate::ui::{badge, kv, Badge, Column, UiContext};

pub const ENTRY_COLUMNS: [Column; 3] = [
    Column::new("FILENAME"),
    Column::new("DATE"),
    Column::new("TITLE"),
];

/// Pretty mode shows minutes; plain mode keeps the stored timestamp.
pub fn format_date(ctx: &UiContext, date: &DateTime<Utc>) -> String {
    if ctx.mode.is_pretty() {
        date.format("%Y-%m-%d %H:%M").to_string()
    } else {
        date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

pub fn entry_rows(ctx: &UiContext, entries: &[EntryDescriptor]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|e| {
            vec![
                e.filename.clone(),
                format_date(ctx, &e.date),
                e.title.clone(),
            ]
        })
        .collect()
}

pub fn print_entry(ctx: &UiContext, descriptor: &EntryDescriptor, text: &str) {
    if ctx.mode.is_pretty() {
        println!("{}", styled(&descriptor.title, styles::bold(), ctx.color));
        println!("{}", kv(ctx, "Date", &format_date(ctx, &descriptor.date)));
        if let Some(modified) = descriptor.modified.as_ref() {
            println!("{}", kv(ctx, "Modified", &format_date(ctx, modified)));
        }
        println!();
    }
    println!("{}", text);
}

pub fn print_report(ctx: &UiContext, report: &IntegrityReport) {
    if report.is_clean() {
        println!("{}", badge(ctx, Badge::Ok, "Metadata and entry files agree"));
        return;
    }
    for name in &report.missing_files {
        println!("{}", badge(ctx, Badge::Err, &format!("missing file: {}", name)));
    }
    for name in &report.orphan_files {
        println!("{}", badge(ctx, Badge::Warn, &format!("orphan file: {}", name)));
    }
    for name in &report.duplicate_filenames {
        println!(
            "{}",
            badge(ctx, Badge::Err, &format!("duplicate descriptor: {}", name))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use chrono::TimeZone;

    #[test]
    fn test_plain_rows_keep_stored_timestamp() {
        let ctx = UiContext::with_mode(OutputMode::Plain);
        let date = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let rows = entry_rows(
            &ctx,
            &[EntryDescriptor::new(1, "t", date, "1.diary")],
        );
        assert_eq!(
            rows,
            vec![vec![
                "1.diary".to_string(),
                "2024-05-06T07:08:09.000Z".to_string(),
                "t".to_string()
            ]]
        );
    }

    #[test]
    fn test_pretty_date_is_short() {
        let ctx = UiContext::with_mode(OutputMode::Pretty);
        let date = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(format_date(&ctx, &date), "2024-05-06 07:08");
    }
}
