//! CLI definitions using clap.

use crate::config::{default_config_path, JsonFileStorage};
use crate::error::{Error, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod terminal;

pub use terminal::{PromptAnswer, TerminalHost};

/// Vault Relay - forward notes and PDFs to automation webhooks
#[derive(Parser, Debug)]
#[command(name = "relay", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (default: ~/.vault-relay/config.json)
    #[arg(long, global = true, env = "RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Vault root directory (default: current directory)
    #[arg(long, global = true, env = "RELAY_VAULT")]
    pub vault: Option<PathBuf>,

    /// Output as JSON
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
    /// List the actions offered for a file
    Menu {
        /// File inside the vault
        file: PathBuf,
    },

    /// Send a file to its webhook
    Send(SendArgs),

    /// Show or edit settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// File inside the vault (.md or .pdf)
    pub file: PathBuf,

    /// Answer the namespace prompt with this value
    #[arg(long, short)]
    pub namespace: Option<String>,

    /// Accept the suggested namespace without asking
    #[arg(long, short, conflicts_with = "namespace")]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current settings (password masked)
    Show,

    /// Set one field: username, password, notes-webhook-url, embeddings-webhook-url
    Set {
        /// Field name
        field: String,
        /// New value
        value: String,
    },

    /// Print the settings file location
    Path,
}

impl Cli {
    /// Resolve the settings file location.
    ///
    /// # Errors
    ///
    /// Returns an error if no path was given and the home directory is unknown.
    pub fn config_path(&self) -> Result<PathBuf> {
        self.config
            .clone()
            .or_else(default_config_path)
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
    }

    /// Build the terminal host from the global flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings path or current directory cannot be
    /// resolved.
    pub fn terminal_host(&self) -> Result<TerminalHost> {
        let vault = match &self.vault {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };
        let storage = JsonFileStorage::new(self.config_path()?);
        Ok(TerminalHost::new(vault, storage).quiet(self.quiet))
    }
}
