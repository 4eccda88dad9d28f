//! The ordered suite against a conforming API.

use spoiler_core::types::StoryId;
use spoiler_harness::{FixtureSlot, StepRegistry, SuiteContext, SuiteRunner};
use spoiler_mock_api::MockBehavior;

use crate::helpers::assertions::assert_all_passed;
use crate::helpers::server::{config_for, run_standard, start};

#[tokio::test]
async fn test_e2e_standard_suite_passes() {
    let (server, report) = run_standard(MockBehavior::default()).await;

    assert_all_passed(&report);
    assert_eq!(report.steps.len(), 7);
    assert_eq!(report.passed(), 7);
    assert!(report.is_success());
    assert_eq!(report.base_url, server.base_url());
    // the story created in step 1 is deleted in step 4
    assert_eq!(server.story_count(), 0);
}

#[tokio::test]
async fn test_e2e_requests_follow_step_order() {
    let (server, _report) = run_standard(MockBehavior::default()).await;

    let sent: Vec<(String, String)> = server
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();

    assert_eq!(sent.len(), 8, "one login plus one request per step");
    assert_eq!(sent[0], ("POST".into(), "/api/User/Authentication".into()));
    assert_eq!(sent[1], ("POST".into(), "/api/Story/Create".into()));
    assert_eq!(sent[2].0, "PUT");
    assert!(sent[2].1.starts_with("/api/Story/Edit/"));
    assert_eq!(sent[3], ("GET".into(), "/api/Story/All".into()));
    assert_eq!(sent[4].0, "DELETE");
    assert!(sent[4].1.starts_with("/api/Story/Delete/"));
    assert_eq!(sent[5], ("POST".into(), "/api/Story/Create".into()));
    assert_eq!(sent[6], ("PUT".into(), "/api/Story/Edit/123".into()));
    assert_eq!(sent[7], ("DELETE".into(), "/api/Story/Delete/123".into()));
}

#[tokio::test]
async fn test_e2e_created_id_reused_by_edit_and_delete() {
    let (server, _report) = run_standard(MockBehavior::default()).await;
    let requests = server.requests();

    let edited = requests[2].path.trim_start_matches("/api/Story/Edit/");
    let deleted = requests[4].path.trim_start_matches("/api/Story/Delete/");
    assert!(!edited.is_empty());
    assert_eq!(edited, deleted);
}

#[tokio::test]
async fn test_e2e_story_routes_carry_bearer_token() {
    let (server, _report) = run_standard(MockBehavior::default()).await;
    let expected = format!("Bearer {}", server.behavior().token);

    for request in server.requests().iter().skip(1) {
        assert_eq!(
            request.authorization.as_deref(),
            Some(expected.as_str()),
            "{} {} missing bearer",
            request.method,
            request.path
        );
    }
}

#[tokio::test]
async fn test_e2e_extended_suite_passes() {
    let server = start(MockBehavior::default()).await;
    let report = SuiteRunner::new(config_for(&server), StepRegistry::extended())
        .run()
        .await;

    assert_all_passed(&report);
    assert_eq!(report.steps.len(), 11);
    assert_eq!(server.story_count(), 0);
}

#[tokio::test]
async fn test_e2e_run_against_session_exposes_context() {
    let server = start(MockBehavior::default()).await;
    let config = config_for(&server);
    let session = spoiler_client::StorySession::open(
        &config.api,
        &config.credentials.to_credentials(),
    )
    .await
    .expect("login should succeed");

    let runner = SuiteRunner::new(config, StepRegistry::standard());
    let mut context = SuiteContext::new();
    let reports = runner.run_against(&session, &mut context).await;
    session.close();

    assert!(reports.iter().all(|r| r.outcome.is_passed()));
    let id: &StoryId = context
        .get(FixtureSlot::CreatedStory)
        .expect("step 1 stores the id");
    assert!(!server.contains_story(id));
}
