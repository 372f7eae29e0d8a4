//! UI primitives for the Diary CLI.
//!
//! - **Context**: Environment detection (TTY, color)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens and styles
//! - **Render**: Tables, badges, key-value lines, hints

mod context;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
#[cfg(test)]
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{badge, hint, kv, simple_table, Column};
