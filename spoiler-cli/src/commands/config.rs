//! `spoiler config` command handler

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use spoiler_core::config::SpoilerConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::commands::ConfigSource;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

const REDACTED: &str = "***REDACTED***";

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    source: &ConfigSource,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(source, writer).await,
        ConfigAction::Show { section } => execute_show(source, section, writer).await,
    }
}

/// Load and validate, reporting the first error instead of failing outright.
async fn execute_validate(source: &ConfigSource, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %source.path().display(), "validating configuration");

    let report = match source.load().await {
        Ok(_) => ConfigValidationReport {
            source: source.path().display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: source.path().display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }
    Ok(())
}

/// Show the effective configuration with the password redacted.
async fn execute_show(
    source: &ConfigSource,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %source.path().display(), "loading configuration");

    let mut config = source.load().await?;
    redact_credentials(&mut config);

    let (config_toml, config_json) = match section.as_deref() {
        None => render_section(&config)?,
        Some("general") => render_section(&config.general)?,
        Some("api") => render_section(&config.api)?,
        Some("credentials") => render_section(&config.credentials)?,
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {other} (expected: general, api, credentials)"
            )));
        }
    };

    let report = ConfigReport {
        source: source.path().display().to_string(),
        section,
        config: config_json,
        config_toml,
    };
    writer.render(&report)?;
    Ok(())
}

fn redact_credentials(config: &mut SpoilerConfig) {
    if !config.credentials.password.is_empty() {
        config.credentials.password = REDACTED.to_owned();
    }
}

fn to_toml<T: Serialize>(value: &T) -> String {
    toml::to_string_pretty(value).unwrap_or_else(|e| format!("(serialization error: {e})"))
}

fn render_section<T: Serialize>(value: &T) -> Result<(String, serde_json::Value), CliError> {
    Ok((to_toml(value), serde_json::to_value(value)?))
}

/// Configuration display report.
///
/// `config_toml` is only used for text rendering.
#[derive(Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub config: serde_json::Value,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if let Some(section) = &self.section {
            let section_label = format!("[{section}]");
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;
        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    /// Empty when valid
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }
        Ok(())
    }
}
