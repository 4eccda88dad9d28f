//! Assertions used by the steps.
//!
//! Each returns `Err(StepFailure::Assertion)` carrying what was expected and
//! what came back, so the report reads without a debugger.

use spoiler_client::ApiResponse;
use spoiler_core::types::StoryId;

use crate::report::StepFailure;

/// Longest body excerpt copied into a failure.
const BODY_EXCERPT_CHARS: usize = 200;

fn mismatch(check: &str, expected: impl Into<String>, actual: impl Into<String>) -> StepFailure {
    StepFailure::Assertion {
        check: check.to_owned(),
        expected: expected.into(),
        actual: actual.into(),
    }
}

fn excerpt(body: &str) -> String {
    if body.chars().count() <= BODY_EXCERPT_CHARS {
        return format!("{body:?}");
    }
    let cut: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
    format!("{cut:?}...")
}

/// Exact status code.
pub fn status(response: &ApiResponse, expected: u16) -> Result<(), StepFailure> {
    if response.status() == expected {
        Ok(())
    } else {
        Err(mismatch(
            &format!("{} status", response.operation()),
            expected.to_string(),
            format!("{} (body {})", response.status(), excerpt(response.body())),
        ))
    }
}

/// Any status outside 2xx.
pub fn not_success(response: &ApiResponse) -> Result<(), StepFailure> {
    if response.is_success() {
        Err(mismatch(
            &format!("{} status", response.operation()),
            "non-2xx",
            response.status().to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Raw body contains `needle`.
pub fn body_contains(response: &ApiResponse, needle: &str) -> Result<(), StepFailure> {
    if response.body_contains(needle) {
        Ok(())
    } else {
        Err(mismatch(
            &format!("{} body", response.operation()),
            format!("to contain {needle:?}"),
            excerpt(response.body()),
        ))
    }
}

/// A decoded string field equals `expected`.
pub fn field_equals(field: &str, expected: &str, actual: Option<&str>) -> Result<(), StepFailure> {
    match actual {
        Some(value) if value == expected => Ok(()),
        Some(value) => Err(mismatch(field, format!("{expected:?}"), format!("{value:?}"))),
        None => Err(mismatch(field, format!("{expected:?}"), "<absent>")),
    }
}

/// The server handed back a usable id.
pub fn story_id(id: Option<StoryId>) -> Result<StoryId, StepFailure> {
    match id {
        Some(id) if !id.is_blank() => Ok(id),
        Some(_) => Err(mismatch("storyId", "non-empty id", "\"\"")),
        None => Err(mismatch("storyId", "non-empty id", "<absent>")),
    }
}

/// At least one element.
pub fn non_empty<T>(what: &str, items: &[T]) -> Result<(), StepFailure> {
    if items.is_empty() {
        Err(mismatch(what, "at least one element", "0"))
    } else {
        Ok(())
    }
}

/// Two counts agree.
pub fn same_count(what: &str, before: usize, after: usize) -> Result<(), StepFailure> {
    if before == after {
        Ok(())
    } else {
        Err(mismatch(what, before.to_string(), after.to_string()))
    }
}
