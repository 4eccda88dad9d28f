//! `spoiler run` command handler

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use spoiler_core::config::SpoilerConfig;
use spoiler_harness::{StepInfo, StepOutcome, StepRegistry, SuiteReport, SuiteRunner};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `run` command.
pub async fn execute(
    args: RunArgs,
    config: SpoilerConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let registry = if args.extended {
        StepRegistry::extended()
    } else {
        StepRegistry::standard()
    };

    if args.list {
        let listing = StepListing {
            steps: registry.list().into_iter().copied().collect(),
        };
        writer.render(&listing)?;
        return Ok(());
    }

    info!(
        base_url = %config.api.base_url,
        extended = args.extended,
        "running conformance suite"
    );
    let report = SuiteRunner::new(config, registry).run().await;
    writer.render(&report)?;
    outcome(&report)
}

/// Map a finished report to the command result.
fn outcome(report: &SuiteReport) -> Result<(), CliError> {
    if let Some(error) = &report.setup_error {
        return Err(CliError::Setup(error.clone()));
    }
    if !report.is_success() {
        return Err(CliError::StepsFailed {
            failed: report.failed() + report.not_run(),
            total: report.steps.len(),
        });
    }
    Ok(())
}

impl Render for SuiteReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Story Spoiler conformance suite")?;
        writeln!(w, "  Target: {}", self.base_url.bold())?;
        if let Some(error) = &self.setup_error {
            writeln!(w, "  Setup:  {} {}", "FAILED".red().bold(), error.red())?;
        }
        writeln!(w)?;

        for step in &self.steps {
            let marker = match &step.outcome {
                StepOutcome::Passed => "PASS".green().bold(),
                StepOutcome::Failed { .. } => "FAIL".red().bold(),
                StepOutcome::NotRun { .. } => "SKIP".yellow().bold(),
            };
            writeln!(
                w,
                "  {} {:>2}  {:<44} {:>6} ms",
                marker, step.order, step.name, step.elapsed_ms
            )?;
            match &step.outcome {
                StepOutcome::Passed => {}
                StepOutcome::Failed { failure } => writeln!(w, "           {}", failure)?,
                StepOutcome::NotRun { reason } => writeln!(w, "           {}", reason.dimmed())?,
            }
        }

        writeln!(w)?;
        let summary = format!(
            "{} passed, {} failed, {} not run",
            self.passed(),
            self.failed(),
            self.not_run()
        );
        let summary = if self.is_success() {
            summary.as_str().green()
        } else {
            summary.as_str().red()
        };
        writeln!(w, "Result: {} ({} ms)", summary, self.elapsed_ms)?;
        Ok(())
    }
}

/// Steps a run would execute.
#[derive(Serialize)]
pub struct StepListing {
    pub steps: Vec<StepInfo>,
}

impl Render for StepListing {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "{:>5}  {:<44} {:<10} Description", "Order", "Name", "Kind")?;
        writeln!(w, "{}", "-".repeat(100))?;
        for step in &self.steps {
            writeln!(
                w,
                "{:>5}  {:<44} {:<10} {}",
                step.order,
                step.name,
                step.kind.to_string(),
                step.description
            )?;
        }
        Ok(())
    }
}
