// ABOUTME: CLI command definitions using clap.
// ABOUTME: Handles subcommands like send, languages, doctor and config.

pub mod config;
pub mod doctor;
pub mod languages;
pub mod send;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lingo", version)]
#[command(about = "Chat with automatic language detection, translation and summaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file override
    #[arg(long, global = true, env = "LINGO_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit one message and print what the pipeline produced
    Send {
        /// Message text
        text: String,
        /// Translate into this language code (e.g. fr, ja, zh-Hant)
        #[arg(long)]
        to: Option<String>,
        /// Also summarize (long English messages only)
        #[arg(long)]
        summarize: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List supported target languages
    Languages,
    /// Show which capabilities are configured
    Doctor,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Generate shell completions
    Completion {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show config file path
    Path,
    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
