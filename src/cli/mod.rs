//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_BACKUP_FILE;
use crate::remote::DEFAULT_BASE_URL;

pub mod commands;

/// TorBox sync CLI - import DMM magnet backups into TorBox
#[derive(Parser, Debug)]
#[command(name = "tbsync", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Preview the run without adding anything to TorBox
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a DMM magnet backup into the TorBox account
    Import(ImportArgs),

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the import command.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// DMM backup JSON file
    #[arg(env = "DMM_BACKUP_JSON_FILE", default_value = DEFAULT_BACKUP_FILE)]
    pub input_file: PathBuf,

    /// TorBox API key
    #[arg(long, env = "TORBOX_API_KEY")]
    pub api_key: Option<String>,

    /// TorBox API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds to wait between add requests
    #[arg(long, default_value_t = 5)]
    pub delay: u64,

    /// Retries per request after a transient failure
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Disable the timestamped run log file
    #[arg(long)]
    pub no_log_file: bool,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
