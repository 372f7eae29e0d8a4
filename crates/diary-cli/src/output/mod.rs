//! Output formatting for entries and reports.

mod json;
mod text;

pub use json::{descriptor_json, entries_json, entry_with_text_json, report_json};
pub use text::{entry_rows, print_entry, print_report, ENTRY_COLUMNS};
