//! Step outcomes and the suite report.
//!
//! A failed step is a value, never an early return: the runner records it
//! and moves on to the next step.

use serde::Serialize;

use spoiler_core::error::RequestError;

/// Why a step did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepFailure {
    /// The API answered, but not what the step expects
    #[error("{check}: expected {expected}, got {actual}")]
    Assertion {
        check: String,
        expected: String,
        actual: String,
    },

    /// The body did not have the documented JSON shape
    #[error("{operation} returned an undecodable body: {reason}")]
    Decode { operation: String, reason: String },

    /// No response within the configured timeout
    #[error("{operation} timed out")]
    Timeout { operation: String },

    /// The request never completed
    #[error("{operation} failed: {reason}")]
    Transport { operation: String, reason: String },

    /// An earlier step did not produce a value this step needs
    #[error("fixture '{slot}' was not set by an earlier step")]
    MissingFixture { slot: String },
}

impl From<RequestError> for StepFailure {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Timeout { operation } => Self::Timeout { operation },
            RequestError::Transport { operation, reason } => Self::Transport { operation, reason },
            RequestError::Decode { operation, reason } => Self::Decode { operation, reason },
            RequestError::ClientBuild { reason } => Self::Transport {
                operation: "build client".to_owned(),
                reason,
            },
        }
    }
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Passed,
    Failed { failure: StepFailure },
    NotRun { reason: String },
}

impl StepOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    pub fn failure(&self) -> Option<&StepFailure> {
        match self {
            Self::Failed { failure } => Some(failure),
            _ => None,
        }
    }
}

/// One line of the suite report.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub order: u32,
    pub name: String,
    pub description: String,
    pub outcome: StepOutcome,
    pub elapsed_ms: u64,
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub base_url: String,
    /// Set when authentication failed and no step ran
    pub setup_error: Option<String>,
    pub steps: Vec<StepReport>,
    pub elapsed_ms: u64,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Failed { .. }))
            .count()
    }

    pub fn not_run(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::NotRun { .. }))
            .count()
    }

    /// Setup succeeded and every step passed.
    pub fn is_success(&self) -> bool {
        self.setup_error.is_none() && self.steps.iter().all(|s| s.outcome.is_passed())
    }

    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.name == name)
    }
}
