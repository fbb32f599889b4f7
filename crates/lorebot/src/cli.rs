//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lorebot - records MUD lore and equipment pastes and pages through them
#[derive(Parser, Debug)]
#[command(name = "lorebot")]
#[command(about = "Records MUD lore and equipment pastes and pages through them", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and serve pastes and slash commands
    Run,

    /// Parse a pasted text file and print the records as JSON
    Parse {
        /// File holding the paste
        file: PathBuf,

        /// Submitter recorded on each record
        #[arg(long, default_value = "lorebot-cli")]
        submitter: String,
    },
}
