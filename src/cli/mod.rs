//! CLI module for Beacon
//!
//! A headless front end for the monitor: it opens the monitor, edits and
//! saves connection settings, and launches missing servers.
//!
//! # Commands
//!
//! - `status` - Probe both local servers and show their reachability
//! - `settings` - Show or change the saved host/port of each server
//! - `launch` - Start a local server and re-check it
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Check both servers
//! beacon status
//!
//! # Point the inference server at another port, then re-check
//! beacon settings set inference --port 1235
//!
//! # Start LM Studio's server and wait for it to come up
//! beacon launch lmstudio
//! ```

pub mod completions;
pub mod config;
pub mod context;
pub mod launch;
pub mod output;
pub mod settings;
pub mod status;

pub use completions::handle_completions;
pub use config::handle_config_init;
pub use context::{build_monitor, load_config_with_overrides};

use crate::endpoint::EndpointKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Beacon - local AI server monitor
#[derive(Parser, Debug)]
#[command(
    name = "beacon",
    version,
    about = "Reachability monitor for local LM Studio and Whisper servers"
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "beacon.toml")]
    pub config: PathBuf,

    /// Settings file holding the saved host/port values
    #[arg(long, global = true, env = "BEACON_STORE_PATH")]
    pub store: Option<PathBuf>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "BEACON_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe both servers and show their status
    Status(StatusArgs),
    /// Show or change saved connection settings
    #[command(subcommand)]
    Settings(SettingsCommands),
    /// Launch a local server and re-check it
    Launch(LaunchArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show saved settings
    Show(SettingsShowArgs),
    /// Change and save settings for one server, then re-check
    Set(SettingsSetArgs),
}

#[derive(Args, Debug)]
pub struct SettingsShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SettingsSetArgs {
    /// Server to change (inference/lmstudio, transcription/whisper)
    pub endpoint: EndpointKind,

    /// New host
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// New port
    #[arg(short, long)]
    pub port: Option<String>,
}

#[derive(Args, Debug)]
pub struct LaunchArgs {
    /// Server to launch (inference/lmstudio, transcription/whisper)
    pub endpoint: EndpointKind,

    /// Launch even if the server already answers
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "beacon.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
