//! Fixture state threaded through the ordered steps.
//!
//! Values produced by an early step (a created story's id) and consumed by
//! later ones live here instead of in process-wide state. The context is
//! created empty by the runner and never reset during a run.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use spoiler_core::types::StoryId;

use crate::report::StepFailure;

/// Named fixture slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureSlot {
    /// Written by step 1, read by the edit and delete steps
    CreatedStory,
    /// Written and consumed by the extended create/edit/delete scenarios
    RoundTripStory,
}

impl fmt::Display for FixtureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreatedStory => write!(f, "created_story"),
            Self::RoundTripStory => write!(f, "round_trip_story"),
        }
    }
}

/// Shared state for one suite run.
#[derive(Debug, Default)]
pub struct SuiteContext {
    slots: BTreeMap<FixtureSlot, StoryId>,
}

impl SuiteContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known id, e.g. to run a later step on its own.
    pub fn with(mut self, slot: FixtureSlot, id: StoryId) -> Self {
        self.slots.insert(slot, id);
        self
    }

    /// Record the id a step just obtained. A later write replaces the value.
    pub fn store(&mut self, slot: FixtureSlot, id: StoryId) {
        debug!(%slot, story_id = %id, "fixture stored");
        self.slots.insert(slot, id);
    }

    pub fn get(&self, slot: FixtureSlot) -> Option<&StoryId> {
        self.slots.get(&slot)
    }

    /// Fetch a value an earlier step should have produced.
    pub fn require(&self, slot: FixtureSlot) -> Result<StoryId, StepFailure> {
        self.slots
            .get(&slot)
            .cloned()
            .ok_or_else(|| StepFailure::MissingFixture {
                slot: slot.to_string(),
            })
    }
}
