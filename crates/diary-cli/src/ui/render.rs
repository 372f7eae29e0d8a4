//! Rendering primitives for CLI output.

use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::theme::{styled, styles, Badge};

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.text(), kind.style(), ctx.color);
    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Column definition for table rendering.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Render a borderless table.
///
/// Pretty mode: aligned columns with a dim header row
/// Plain mode: tab-separated values, no header
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if ctx.mode.is_pretty() {
        let mut table = ComfyTable::new();
        table.load_preset(comfy_table::presets::NOTHING);
        table.set_content_arrangement(ContentArrangement::Dynamic);

        let header_cells: Vec<Cell> = columns
            .iter()
            .map(|c| {
                let mut cell = Cell::new(c.header);
                if ctx.color {
                    cell = cell.add_attribute(Attribute::Dim);
                }
                cell
            })
            .collect();
        table.set_header(header_cells);

        for i in 0..columns.len() {
            if let Some(column) = table.column_mut(i) {
                column.set_padding((0, 2));
            }
        }

        for row in rows {
            table.add_row(row);
        }

        table.to_string()
    } else {
        rows.iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    #[test]
    fn test_kv_plain() {
        let ctx = UiContext::with_mode(OutputMode::Plain);
        assert_eq!(kv(&ctx, "Data dir", "/tmp/d"), "data_dir=/tmp/d");
    }

    #[test]
    fn test_kv_pretty() {
        let ctx = UiContext::with_mode(OutputMode::Pretty);
        assert_eq!(kv(&ctx, "Title", "Morning"), "Title: Morning");
    }

    #[test]
    fn test_badge_without_message() {
        let ctx = UiContext::with_mode(OutputMode::Plain);
        assert_eq!(badge(&ctx, Badge::Warn, ""), "[WARN]");
        assert_eq!(badge(&ctx, Badge::Ok, "done"), "[OK] done");
    }

    #[test]
    fn test_plain_table_is_tab_separated() {
        let ctx = UiContext::with_mode(OutputMode::Plain);
        let rows = vec![
            vec!["1.diary".to_string(), "a".to_string()],
            vec!["2.diary".to_string(), "b".to_string()],
        ];
        let out = simple_table(&ctx, &[Column::new("FILE"), Column::new("TITLE")], &rows);
        assert_eq!(out, "1.diary\ta\n2.diary\tb");
    }

    #[test]
    fn test_pretty_table_has_header() {
        let ctx = UiContext::with_mode(OutputMode::Pretty);
        let rows = vec![vec!["1.diary".to_string(), "Morning".to_string()]];
        let out = simple_table(&ctx, &[Column::new("FILE"), Column::new("TITLE")], &rows);
        assert!(out.contains("FILE"));
        assert!(out.contains("Morning"));
    }
}
