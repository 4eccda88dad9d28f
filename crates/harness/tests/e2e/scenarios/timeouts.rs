//! Slow responses become timeout failures, not hangs.

use std::time::Duration;

use spoiler_harness::{StepFailure, StepRegistry, SuiteRunner};
use spoiler_mock_api::MockBehavior;

use crate::helpers::server::{config_for, start};

#[tokio::test]
async fn test_e2e_slow_story_routes_time_out_per_step() {
    let server = start(MockBehavior {
        story_delay: Some(Duration::from_secs(3)),
        ..MockBehavior::default()
    })
    .await;
    let mut config = config_for(&server);
    config.api.timeout_secs = 1;

    let report = SuiteRunner::new(config, StepRegistry::standard()).run().await;

    // login is not delayed, so setup succeeds
    assert!(report.setup_error.is_none());

    let create = report
        .step("create_story_with_required_fields")
        .and_then(|s| s.outcome.failure())
        .expect("create should fail");
    assert_eq!(
        create,
        &StepFailure::Timeout {
            operation: "create story".to_owned()
        }
    );

    let list = report
        .step("list_all_stories")
        .and_then(|s| s.outcome.failure())
        .expect("list should fail");
    assert!(matches!(list, StepFailure::Timeout { .. }));

    // every step was attempted and reported
    assert_eq!(report.steps.len(), 7);
    assert_eq!(report.not_run(), 0);
    assert_eq!(report.passed(), 0);
}
