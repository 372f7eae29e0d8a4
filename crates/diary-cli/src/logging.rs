//! Tracing setup for the CLI.
//!
//! Log lines go to stderr so stdout stays clean for entry text and JSON.
//! `DIARY_LOG` takes an `EnvFilter` directive string and overrides `-v`.

use tracing_subscriber::EnvFilter;

use crate::constants::env;

fn default_directives(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    format!("diary_core={level},diary={level}")
}

pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(env::LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
