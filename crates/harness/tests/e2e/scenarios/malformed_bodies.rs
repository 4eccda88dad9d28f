//! Bodies that do not decode are reported as decode failures.

use spoiler_harness::StepFailure;
use spoiler_mock_api::MockBehavior;

use crate::helpers::assertions::{assert_failed, assert_passed};
use crate::helpers::server::run_standard;

#[tokio::test]
async fn test_e2e_malformed_create_body() {
    let (_server, report) = run_standard(MockBehavior {
        malformed_create: true,
        ..MockBehavior::default()
    })
    .await;

    let failure = assert_failed(&report, "create_story_with_required_fields");
    assert!(
        matches!(failure, StepFailure::Decode { .. }),
        "expected decode failure, got {failure:?}"
    );

    // no id was stored, so the dependent steps cannot run their requests
    for name in ["edit_created_story", "delete_created_story"] {
        let failure = assert_failed(&report, name);
        assert_eq!(
            failure,
            &StepFailure::MissingFixture {
                slot: "created_story".to_owned()
            }
        );
    }

    assert_passed(&report, "list_all_stories");
    assert_passed(&report, "create_story_without_required_fields");
}

#[tokio::test]
async fn test_e2e_malformed_list_body() {
    let (_server, report) = run_standard(MockBehavior {
        malformed_list: true,
        ..MockBehavior::default()
    })
    .await;

    let failure = assert_failed(&report, "list_all_stories");
    match failure {
        StepFailure::Decode { operation, .. } => assert_eq!(operation, "list stories"),
        other => panic!("expected decode failure, got {other:?}"),
    }
    assert_eq!(report.failed(), 1);
}
