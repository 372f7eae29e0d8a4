mod entries;
mod files;
mod init;
mod maintenance;
mod misc;

pub use entries::{handle_delete, handle_edit, handle_list, handle_new, handle_show};
pub use files::{handle_export, handle_import};
pub use init::handle_init;
pub use maintenance::{handle_check, handle_serve_json};
pub use misc::handle_completions;
