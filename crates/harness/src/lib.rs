//! Ordered, stateful conformance suite for the Story Spoiler API.
//!
//! The suite authenticates once, then walks a fixed sequence of steps
//! against the story endpoints. Each step checks status codes and bodies
//! and may hand a story id to later steps through the [`SuiteContext`].
//!
//! # Usage
//! ```no_run
//! # async fn example() -> Result<(), spoiler_core::error::SpoilerError> {
//! use spoiler_core::config::SpoilerConfig;
//! use spoiler_harness::{StepRegistry, SuiteRunner};
//!
//! let config = SpoilerConfig::load_or_default("spoiler.toml").await?;
//! let report = SuiteRunner::new(config, StepRegistry::standard()).run().await;
//! println!("{} passed, {} failed", report.passed(), report.failed());
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod context;
pub mod report;
pub mod runner;
pub mod step;
pub mod steps;

pub use context::{FixtureSlot, SuiteContext};
pub use report::{StepFailure, StepOutcome, StepReport, SuiteReport};
pub use runner::SuiteRunner;
pub use step::{RegistryError, Step, StepFn, StepInfo, StepKind, StepRegistry, StepResult};
