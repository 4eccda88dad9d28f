//! `spoiler` -- command-line entry point for the Story Spoiler conformance suite.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use spoiler_core::config::{GeneralConfig, SpoilerConfig};

use crate::cli::{Cli, Commands};
use crate::commands::ConfigSource;
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let writer = OutputWriter::new(cli.output);

    let code = match dispatch(cli, &writer).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

async fn dispatch(cli: Cli, writer: &OutputWriter) -> Result<(), CliError> {
    let source = ConfigSource::new(cli.config);
    let log_level = cli.log_level.as_deref();

    match cli.command {
        Commands::Config(args) => {
            let mut general = GeneralConfig::default();
            if let Some(level) = log_level {
                general.log_level = level.to_owned();
            }
            init_logging(&general);
            commands::config::execute(args, &source, writer).await
        }
        Commands::Run(args) => {
            let config = load(&source, log_level).await?;
            commands::run::execute(args, config, writer).await
        }
        Commands::Auth => {
            let config = load(&source, log_level).await?;
            commands::auth::execute(config, writer).await
        }
    }
}

async fn load(source: &ConfigSource, log_level: Option<&str>) -> Result<SpoilerConfig, CliError> {
    let config = source.load_with_overrides(log_level).await?;
    init_logging(&config.general);
    tracing::debug!(path = %source.path().display(), "configuration loaded");
    Ok(config)
}

fn init_logging(general: &GeneralConfig) {
    if let Err(e) = logging::init_tracing(general) {
        eprintln!("{} {:#}", "warning:".yellow().bold(), e);
    }
}
