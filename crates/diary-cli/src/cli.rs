use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use diary_core::VERSION;

/// Diary - a password-protected personal journal, encrypted at rest
#[derive(Parser)]
#[command(name = "diary")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding metadata.json and entries/
    #[arg(short, long, global = true, env = "DIARY_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_input: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Directory to use for diary data (defaults to the XDG data dir)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Default editor to record in the config
    #[arg(long)]
    pub editor: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show at most this many entries
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

/// Arguments for the `new` command
#[derive(Args)]
pub struct NewArgs {
    /// Entry title
    #[arg(short, long)]
    pub title: String,

    /// Entry body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Output the created descriptor as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry filename (as printed by `diary list`)
    pub filename: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry filename
    pub filename: String,

    /// New title (keeps the current title when omitted)
    #[arg(short, long)]
    pub title: Option<String>,

    /// New body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Overwrite without proving the current password
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry filename
    pub filename: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Entry filename
    pub filename: String,

    /// Destination path for the sealed file
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// Sealed .diary file to import
    #[arg(value_name = "SRC")]
    pub src: PathBuf,

    /// Title for the imported entry
    #[arg(short, long)]
    pub title: String,

    /// Output the created descriptor as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command
#[derive(Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up the data directory and write a config file
    Init(InitArgs),

    /// List entries, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Write a new encrypted entry
    #[command(alias = "add")]
    New(NewArgs),

    /// Decrypt and print an entry
    Show(ShowArgs),

    /// Replace an entry's title and body
    Edit(EditArgs),

    /// Delete an entry
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Copy an entry's sealed file elsewhere
    Export(ExportArgs),

    /// Add a sealed .diary file as a new entry
    Import(ImportArgs),

    /// Compare the metadata index against entry files
    Check(CheckArgs),

    /// Serve JSON requests on stdin, one per line
    ServeJson,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
