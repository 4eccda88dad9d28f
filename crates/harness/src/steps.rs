//! The conformance steps.
//!
//! Steps 1-7 are the standard ordered suite. Steps 8-11 are opt-in
//! scenarios checking list idempotence, create/edit round-trips, repeated
//! deletes and required-field validation with a populated `url`.

use spoiler_client::{BoxFuture, DynStoryApi};
use spoiler_core::types::{ApiMessage, StoryDraft, StoryEnvelope, StoryId};

use crate::check;
use crate::context::{FixtureSlot, SuiteContext};
use crate::report::StepFailure;
use crate::step::{Step, StepInfo, StepKind, StepResult};

/// Messages the API answers with.
pub mod expected {
    pub const CREATED: &str = "Successfully created!";
    pub const EDITED: &str = "Successfully edited";
    pub const DELETED: &str = "Deleted successfully!";
    pub const NOT_FOUND: &str = "No spoilers...";
    pub const DELETE_FAILED: &str = "Unable to delete this story spoiler!";
}

/// Syntactically valid id that never names a story.
pub const NON_EXISTENT_ID: &str = "123";

pub(crate) fn standard() -> Vec<Step> {
    vec![
        Step::new(
            StepInfo {
                order: 1,
                name: "create_story_with_required_fields",
                description: "POST Create with title and description returns 201, a storyId and the created message",
                kind: StepKind::HappyPath,
            },
            create_story_with_required_fields,
        ),
        Step::new(
            StepInfo {
                order: 2,
                name: "edit_created_story",
                description: "PUT Edit on the story from step 1 returns 200 and the edited message",
                kind: StepKind::HappyPath,
            },
            edit_created_story,
        ),
        Step::new(
            StepInfo {
                order: 3,
                name: "list_all_stories",
                description: "GET All returns 200 and a non-empty collection",
                kind: StepKind::HappyPath,
            },
            list_all_stories,
        ),
        Step::new(
            StepInfo {
                order: 4,
                name: "delete_created_story",
                description: "DELETE on the story from step 1 returns 200 and the deleted message",
                kind: StepKind::HappyPath,
            },
            delete_created_story,
        ),
        Step::new(
            StepInfo {
                order: 5,
                name: "create_story_without_required_fields",
                description: "POST Create with empty title and description returns 400",
                kind: StepKind::Negative,
            },
            create_story_without_required_fields,
        ),
        Step::new(
            StepInfo {
                order: 6,
                name: "edit_missing_story",
                description: "PUT Edit on an unknown id returns 404 with the not-found message",
                kind: StepKind::Negative,
            },
            edit_missing_story,
        ),
        Step::new(
            StepInfo {
                order: 7,
                name: "delete_missing_story",
                description: "DELETE on an unknown id returns 400 with the delete-failed message",
                kind: StepKind::Negative,
            },
            delete_missing_story,
        ),
    ]
}

pub(crate) fn scenarios() -> Vec<Step> {
    vec![
        Step::new(
            StepInfo {
                order: 8,
                name: "list_is_read_only",
                description: "Two consecutive GET All calls return collections of the same size",
                kind: StepKind::Scenario,
            },
            list_is_read_only,
        ),
        Step::new(
            StepInfo {
                order: 9,
                name: "create_then_edit_round_trip",
                description: "A freshly created story can be edited immediately by its id",
                kind: StepKind::Scenario,
            },
            create_then_edit_round_trip,
        ),
        Step::new(
            StepInfo {
                order: 10,
                name: "delete_twice_fails",
                description: "Deleting the step 9 story succeeds once, then fails",
                kind: StepKind::Scenario,
            },
            delete_twice_fails,
        ),
        Step::new(
            StepInfo {
                order: 11,
                name: "create_without_required_fields_ignores_url",
                description: "POST Create with empty title and description returns 400 even when url is set",
                kind: StepKind::Scenario,
            },
            create_without_required_fields_ignores_url,
        ),
    ]
}

fn created_draft() -> StoryDraft {
    StoryDraft::new("New Story Spoiler", "Story Spoiler Description")
}

fn edited_draft() -> StoryDraft {
    StoryDraft::new("Edited Story", "This is an updated story")
}

/// Create a story, check the 201 envelope, return its id.
async fn create_valid_story(api: &dyn DynStoryApi) -> Result<StoryId, StepFailure> {
    let response = api.create(&created_draft()).await?;
    check::status(&response, 201)?;
    let message: ApiMessage = response.json()?;
    let id = check::story_id(message.story_id)?;
    check::field_equals("msg", expected::CREATED, message.msg.as_deref())?;
    Ok(id)
}

async fn edit_story(api: &dyn DynStoryApi, id: &StoryId) -> StepResult {
    let response = api.edit(id, &edited_draft()).await?;
    check::status(&response, 200)?;
    let message: ApiMessage = response.json()?;
    check::field_equals("msg", expected::EDITED, message.msg.as_deref())
}

async fn list_stories(api: &dyn DynStoryApi) -> Result<Vec<StoryEnvelope>, StepFailure> {
    let response = api.list().await?;
    check::status(&response, 200)?;
    Ok(response.json()?)
}

// ---- 1-7 ----

fn create_story_with_required_fields<'a>(
    api: &'a dyn DynStoryApi,
    ctx: &'a mut SuiteContext,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let response = api.create(&created_draft()).await?;
        check::status(&response, 201)?;
        let message: ApiMessage = response.json()?;
        let id = check::story_id(message.story_id)?;
        // stored before the msg check: later steps can still use a real id
        ctx.store(FixtureSlot::CreatedStory, id);
        check::field_equals("msg", expected::CREATED, message.msg.as_deref())
    })
}

fn edit_created_story<'a>(
    api: &'a dyn DynStoryApi,
    ctx: &'a mut SuiteContext,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let id = ctx.require(FixtureSlot::CreatedStory)?;
        edit_story(api, &id).await
    })
}

fn list_all_stories<'a>(
    api: &'a dyn DynStoryApi,
    _ctx: &'a mut SuiteContext,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let stories = list_stories(api).await?;
        check::non_empty("story list", &stories)
    })
}

fn delete_created_story<'a>(
    api: &'a dyn DynStoryApi,
    ctx: &'a mut SuiteContext,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let id = ctx.require(FixtureSlot::CreatedStory)?;
        let response = api.delete(&id).await?;
        check::status(&response, 200)?;
        check::body_contains(&response, expected::DELETED)
    })
}

fn create_story_without_required_fields<'a>(
    api: &'a dyn DynStoryApi,
    _ctx: &'a mut SuiteContext,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let response = api.create(&StoryDraft::empty()).await?;
        check::status(&response, 400)
    })
}

fn edit_missing_story<'a>(
    api: &'a dyn DynStoryApi,
    _ctx: &'a mut SuiteContext,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let draft = StoryDraft::new(
            "Edited Non-Existing Story",
            "This is an updated test story description for a non-existing story.",
        );
        let response = api.edit(&StoryId::new(NON_EXISTENT_ID), &draft).await?;
        check::status(&response, 404)?;
        check::body_contains(&response, expected::NOT_FOUND)
    })
}

fn delete_missing_story<'a>(
    api: &'a dyn DynStoryApi,
    _ctx: &'a mut SuiteContext,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let response = api.delete(&StoryId::new(NON_EXISTENT_ID)).await?;
        check::status(&response, 400)?;
        check::body_contains(&response, expected::DELETE_FAILED)
    })
}

// ---- 8-11 ----

fn list_is_read_only<'a>(
    api: &'a dyn DynStoryApi,
    _ctx: &'a mut SuiteContext,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let first = list_stories(api).await?;
        let second = list_stories(api).await?;
        check::same_count("story count across listings", first.len(), second.len())
    })
}

fn create_then_edit_round_trip<'a>(
    api: &'a dyn DynStoryApi,
    ctx: &'a mut SuiteContext,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let id = create_valid_story(api).await?;
        ctx.store(FixtureSlot::RoundTripStory, id.clone());
        edit_story(api, &id).await
    })
}

fn delete_twice_fails<'a>(
    api: &'a dyn DynStoryApi,
    ctx: &'a mut SuiteContext,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let id = ctx.require(FixtureSlot::RoundTripStory)?;

        let first = api.delete(&id).await?;
        check::status(&first, 200)?;
        check::body_contains(&first, expected::DELETED)?;

        let second = api.delete(&id).await?;
        check::not_success(&second)
    })
}

fn create_without_required_fields_ignores_url<'a>(
    api: &'a dyn DynStoryApi,
    _ctx: &'a mut SuiteContext,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let draft = StoryDraft::empty().with_url("https://example.com/spoiler.png");
        let response = api.create(&draft).await?;
        check::status(&response, 400)
    })
}
