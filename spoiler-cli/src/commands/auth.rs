//! `spoiler auth` command handler

use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use spoiler_core::config::SpoilerConfig;
use spoiler_harness::{StepRegistry, SuiteRunner};

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `auth` command. The token itself is never printed.
pub async fn execute(config: SpoilerConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let base_url = config.api.base_url.clone();
    let username = config.credentials.username.clone();
    let runner = SuiteRunner::new(config, StepRegistry::new());

    let result = runner.check_authentication().await;
    let report = AuthReport {
        base_url,
        username,
        authenticated: result.is_ok(),
        error: result.as_ref().err().map(ToString::to_string),
    };
    writer.render(&report)?;

    result.map_err(|e| CliError::Setup(e.to_string()))
}

/// Result of the token exchange.
#[derive(Serialize)]
pub struct AuthReport {
    pub base_url: String,
    pub username: String,
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Render for AuthReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Authentication: {}", self.base_url.bold())?;
        writeln!(w, "  User:   {}", self.username)?;
        if self.authenticated {
            writeln!(w, "  Result: {}", "TOKEN OBTAINED".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "FAILED".red().bold())?;
        }
        if let Some(error) = &self.error {
            writeln!(w, "  Error:  {}", error.red())?;
        }
        Ok(())
    }
}
