//! Application context, path resolution, and password handling.

mod context;
mod password;
mod resolver;

pub use context::AppContext;
pub use password::{read_password, unlock_entry};
pub use resolver::resolve_config_path;
