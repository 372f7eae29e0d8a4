//! Input helpers shared by command handlers.

mod input;

pub use input::{confirm, read_entry_body, require_non_empty};
