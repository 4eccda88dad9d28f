//! The extended scenarios, passing and failing.

use spoiler_harness::StepFailure;
use spoiler_mock_api::MockBehavior;

use crate::helpers::assertions::{assert_failed, assert_passed};
use crate::helpers::server::run_extended;

#[tokio::test]
async fn test_e2e_list_is_read_only() {
    let (server, report) = run_extended(MockBehavior {
        seed_stories: 2,
        ..MockBehavior::default()
    })
    .await;

    assert_passed(&report, "list_is_read_only");
    assert_eq!(server.story_count(), 2);
}

#[tokio::test]
async fn test_e2e_round_trip_and_double_delete() {
    let (server, report) = run_extended(MockBehavior::default()).await;

    assert_passed(&report, "create_then_edit_round_trip");
    assert_passed(&report, "delete_twice_fails");

    // second delete of the round-trip story was rejected
    let deletes: Vec<_> = server
        .requests()
        .into_iter()
        .filter(|r| r.method == "DELETE")
        .map(|r| r.path)
        .collect();
    assert_eq!(deletes.len(), 4);
    assert_eq!(deletes[2], deletes[3]);
}

#[tokio::test]
async fn test_e2e_create_without_required_fields_ignores_url() {
    let (_server, report) = run_extended(MockBehavior::default()).await;
    assert_passed(&report, "create_without_required_fields_ignores_url");
}

#[tokio::test]
async fn test_e2e_round_trip_failure_leaves_delete_without_fixture() {
    let (_server, report) = run_extended(MockBehavior {
        malformed_create: true,
        ..MockBehavior::default()
    })
    .await;

    assert!(matches!(
        assert_failed(&report, "create_then_edit_round_trip"),
        StepFailure::Decode { .. }
    ));
    assert_eq!(
        assert_failed(&report, "delete_twice_fails"),
        &StepFailure::MissingFixture {
            slot: "round_trip_story".to_owned()
        }
    );
}
