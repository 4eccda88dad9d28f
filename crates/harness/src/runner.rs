//! Sequential suite execution.
//!
//! # Lifecycle
//! 1. Authenticate once with the configured credentials
//! 2. Await every registered step in order against the session, sharing one
//!    [`SuiteContext`]
//! 3. Close the session, whatever the step outcomes were
//!
//! If step 1 fails nothing is sent to the story routes: the report carries
//! the setup error and every step is [`StepOutcome::NotRun`].

use std::time::Instant;

use tracing::{debug, info, warn};

use spoiler_client::{DynStoryApi, StorySession};
use spoiler_core::config::SpoilerConfig;
use spoiler_core::error::AuthError;

use crate::context::SuiteContext;
use crate::report::{StepOutcome, StepReport, SuiteReport};
use crate::step::{Step, StepRegistry};

/// Runs a [`StepRegistry`] against the configured API.
pub struct SuiteRunner {
    config: SpoilerConfig,
    registry: StepRegistry,
}

impl SuiteRunner {
    pub fn new(config: SpoilerConfig, registry: StepRegistry) -> Self {
        Self { config, registry }
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SpoilerConfig {
        &self.config
    }

    /// Authenticate, run every step, close the session.
    pub async fn run(&self) -> SuiteReport {
        let started = Instant::now();
        let base_url = self.config.api.base_url.clone();
        info!(
            %base_url,
            steps = self.registry.count(),
            "starting conformance suite"
        );

        let session = match self.authenticate().await {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "setup failed, no step will run");
                let reason = format!("setup failed: {err}");
                return SuiteReport {
                    base_url,
                    setup_error: Some(err.to_string()),
                    steps: self
                        .registry
                        .iter()
                        .map(|step| not_run(step, &reason))
                        .collect(),
                    elapsed_ms: elapsed_ms(started),
                };
            }
        };

        let mut context = SuiteContext::new();
        let steps = self.run_against(&session, &mut context).await;
        session.close();

        let report = SuiteReport {
            base_url,
            setup_error: None,
            steps,
            elapsed_ms: elapsed_ms(started),
        };
        info!(
            passed = report.passed(),
            failed = report.failed(),
            elapsed_ms = report.elapsed_ms,
            "conformance suite finished"
        );
        report
    }

    /// Run the registered steps against `api`, in order, one at a time.
    ///
    /// A failing step never stops the run.
    pub async fn run_against(
        &self,
        api: &dyn DynStoryApi,
        context: &mut SuiteContext,
    ) -> Vec<StepReport> {
        let mut reports = Vec::with_capacity(self.registry.count());

        for step in self.registry.iter() {
            let info = step.info();
            debug!(order = info.order, step = info.name, kind = %info.kind, "step started");

            let started = Instant::now();
            let result = step.run(api, context).await;
            let elapsed_ms = elapsed_ms(started);

            let outcome = match result {
                Ok(()) => {
                    info!(order = info.order, step = info.name, elapsed_ms, "step passed");
                    StepOutcome::Passed
                }
                Err(failure) => {
                    warn!(
                        order = info.order,
                        step = info.name,
                        elapsed_ms,
                        %failure,
                        "step failed"
                    );
                    StepOutcome::Failed { failure }
                }
            };

            reports.push(StepReport {
                order: info.order,
                name: info.name.to_owned(),
                description: info.description.to_owned(),
                outcome,
                elapsed_ms,
            });
        }

        reports
    }

    /// Only the setup phase: obtain a token, then release the session.
    pub async fn check_authentication(&self) -> Result<(), AuthError> {
        let session = self.authenticate().await?;
        session.close();
        Ok(())
    }

    async fn authenticate(&self) -> Result<StorySession, AuthError> {
        let credentials = self.config.credentials.to_credentials();
        StorySession::open(&self.config.api, &credentials).await
    }
}

fn not_run(step: &Step, reason: &str) -> StepReport {
    let info = step.info();
    StepReport {
        order: info.order,
        name: info.name.to_owned(),
        description: info.description.to_owned(),
        outcome: StepOutcome::NotRun {
            reason: reason.to_owned(),
        },
        elapsed_ms: 0,
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
