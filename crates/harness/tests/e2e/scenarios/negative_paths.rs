//! Steps that expect the API to reject a request.

use spoiler_harness::StepFailure;
use spoiler_mock_api::MockBehavior;

use crate::helpers::assertions::{assert_failed, assert_passed};
use crate::helpers::server::run_standard;

#[tokio::test]
async fn test_e2e_negative_steps_pass_against_conforming_api() {
    let (_server, report) = run_standard(MockBehavior::default()).await;

    assert_passed(&report, "create_story_without_required_fields");
    assert_passed(&report, "edit_missing_story");
    assert_passed(&report, "delete_missing_story");
}

#[tokio::test]
async fn test_e2e_wrong_edit_message_fails_only_edit() {
    let (_server, report) = run_standard(MockBehavior {
        wrong_edit_message: true,
        ..MockBehavior::default()
    })
    .await;

    let failure = assert_failed(&report, "edit_created_story");
    match failure {
        StepFailure::Assertion {
            check,
            expected,
            actual,
        } => {
            assert_eq!(check, "msg");
            assert!(expected.contains("Successfully edited"));
            assert!(actual.contains("Edited, probably"));
        }
        other => panic!("expected assertion failure, got {other:?}"),
    }
    assert_eq!(report.failed(), 1);
    // later steps still ran
    assert_passed(&report, "delete_created_story");
    assert_passed(&report, "delete_missing_story");
}

#[tokio::test]
async fn test_e2e_seeded_stories_do_not_break_the_suite() {
    let (server, report) = run_standard(MockBehavior {
        seed_stories: 3,
        ..MockBehavior::default()
    })
    .await;

    assert!(report.is_success());
    assert_eq!(server.story_count(), 3);
}
