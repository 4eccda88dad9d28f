//! CLI argument parsing using clap derive API
//!
//! Purely declarative: no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "spoiler.toml";

/// Spoiler -- conformance suite for the Story Spoiler API.
///
/// Use `spoiler <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "spoiler", version, about, long_about = None)]
pub struct Cli {
    /// Path to the spoiler.toml configuration file [default: spoiler.toml, optional].
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and run the ordered suite.
    Run(RunArgs),

    /// Only exchange credentials for a token and report the result.
    Auth,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- run ----

/// Run the conformance suite.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Also run the property scenarios after the seven standard steps.
    #[arg(short, long)]
    pub extended: bool,

    /// Print the steps that would run, without contacting the API.
    #[arg(long)]
    pub list: bool,
}

// ---- config ----

/// Manage spoiler configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, api, credentials).
        #[arg(long)]
        section: Option<String>,
    },
}
