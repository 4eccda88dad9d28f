//! Steps and the ordered registry that holds them.
//!
//! A [`Step`] pairs metadata with a function that receives the session and
//! the shared [`SuiteContext`]. The [`StepRegistry`] keeps steps sorted by
//! `order` and refuses duplicates, so iteration order is the run order.
//!
//! # Order
//! ```text
//! 1 create → 2 edit → 3 list → 4 delete → 5 create(invalid) → 6 edit(missing) → 7 delete(missing)
//! [extended] 8 list twice → 9 create+edit → 10 delete twice → 11 create(invalid, url)
//! ```

use std::fmt;

use serde::Serialize;

use spoiler_client::{BoxFuture, DynStoryApi};

use crate::context::SuiteContext;
use crate::report::StepFailure;
use crate::steps;

/// What a step returns.
pub type StepResult = Result<(), StepFailure>;

/// Signature every step function has.
pub type StepFn =
    for<'a> fn(&'a dyn DynStoryApi, &'a mut SuiteContext) -> BoxFuture<'a, StepResult>;

/// Broad category, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Expected to succeed against a conforming API
    HappyPath,
    /// Checks rejection of invalid input or unknown ids
    Negative,
    /// Multi-request property check
    Scenario,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HappyPath => write!(f, "happy-path"),
            Self::Negative => write!(f, "negative"),
            Self::Scenario => write!(f, "scenario"),
        }
    }
}

/// Step metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepInfo {
    /// Position in the run; unique within a registry
    pub order: u32,
    /// Stable identifier, also used as the report name
    pub name: &'static str,
    pub description: &'static str,
    pub kind: StepKind,
}

/// One ordered test case.
#[derive(Clone, Copy)]
pub struct Step {
    info: StepInfo,
    run: StepFn,
}

impl Step {
    pub const fn new(info: StepInfo, run: StepFn) -> Self {
        Self { info, run }
    }

    pub fn info(&self) -> &StepInfo {
        &self.info
    }

    /// Execute against `api`, reading and writing `context`.
    pub fn run<'a>(
        &self,
        api: &'a dyn DynStoryApi,
        context: &'a mut SuiteContext,
    ) -> BoxFuture<'a, StepResult> {
        (self.run)(api, context)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("info", &self.info).finish()
    }
}

/// Registry errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("step order {order} is already taken by '{existing}'")]
    DuplicateOrder { order: u32, existing: &'static str },

    #[error("step '{name}' is already registered")]
    DuplicateName { name: &'static str },
}

/// Steps sorted by `order`.
#[derive(Debug, Default)]
pub struct StepRegistry {
    steps: Vec<Step>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// The seven ordered conformance steps.
    pub fn standard() -> Self {
        Self {
            steps: steps::standard(),
        }
    }

    /// The standard steps followed by the property scenarios.
    pub fn extended() -> Self {
        let mut all = steps::standard();
        all.extend(steps::scenarios());
        Self { steps: all }
    }

    /// Insert a step at its ordered position.
    pub fn register(&mut self, step: Step) -> Result<(), RegistryError> {
        let info = step.info;
        if let Some(existing) = self.steps.iter().find(|s| s.info.order == info.order) {
            return Err(RegistryError::DuplicateOrder {
                order: info.order,
                existing: existing.info.name,
            });
        }
        if self.steps.iter().any(|s| s.info.name == info.name) {
            return Err(RegistryError::DuplicateName { name: info.name });
        }
        let pos = self.steps.partition_point(|s| s.info.order < info.order);
        self.steps.insert(pos, step);
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step metadata in run order.
    pub fn list(&self) -> Vec<&StepInfo> {
        self.steps.iter().map(Step::info).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.info.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }
}
