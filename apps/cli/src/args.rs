//! # CLI Argument Definitions
//!
//! Global flags select the config file, data directory and account; every vault command
//! reads the PIN from `--pin` or `PINVAULT_PIN`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pinvault")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "PIN-unlocked password vault")]
pub(crate) struct Cli {
    /// Config file (TOML, YAML or JSON); `pinvault.*` in the working directory if omitted
    #[arg(short, long, global = true, env = "PINVAULT_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Directory holding vault records (overrides `storage.data_dir`)
    #[arg(short, long, global = true)]
    pub(crate) data_dir: Option<PathBuf>,

    /// Account name (overrides `storage.account`)
    #[arg(short, long, global = true)]
    pub(crate) account: Option<String>,

    /// Four-digit PIN
    #[arg(short, long, global = true, env = "PINVAULT_PIN", hide_env_values = true)]
    pub(crate) pin: Option<String>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Show whether the account holds a vault
    Status,
    /// Create a new, empty vault
    Init,
    /// List entries without passwords
    #[command(alias = "ls")]
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one entry
    Show {
        id: String,
        /// Print the password instead of a mask
        #[arg(long)]
        reveal: bool,
    },
    /// Add an entry and print its id
    Add {
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Change fields of an entry
    Update {
        id: String,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Delete an entry
    #[command(alias = "rm")]
    Remove { id: String },
    /// Re-key the vault under a new PIN
    ChangePin {
        /// The replacement four-digit PIN
        #[arg(long, env = "PINVAULT_NEW_PIN", hide_env_values = true)]
        new_pin: String,
    },
    /// Write a plaintext backup (stdout if no file is given)
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge entries from a backup file
    Import { file: PathBuf },
    /// Delete every entry
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub(crate) struct EntryFields {
    #[arg(short = 's', long = "service")]
    pub(crate) service_name: Option<String>,
    #[arg(short, long)]
    pub(crate) username: Option<String>,
    #[arg(long)]
    pub(crate) password: Option<String>,
    #[arg(long)]
    pub(crate) url: Option<String>,
    #[arg(long)]
    pub(crate) notes: Option<String>,
}
