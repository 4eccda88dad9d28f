//! Authentication failures stop the suite before any story request.

use spoiler_harness::{StepRegistry, SuiteRunner};
use spoiler_mock_api::MockBehavior;

use crate::helpers::assertions::assert_setup_failed;
use crate::helpers::server::{config_for, start};

#[tokio::test]
async fn test_e2e_bad_credentials() {
    let server = start(MockBehavior::default()).await;
    let mut config = config_for(&server);
    config.credentials.password = "not-the-password".to_owned();

    let report = SuiteRunner::new(config, StepRegistry::standard()).run().await;

    let error = assert_setup_failed(&report);
    assert!(error.contains("401"), "unexpected setup error: {error}");
    assert_eq!(report.steps.len(), 7);
    // only the login was attempted
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_e2e_malformed_token_response() {
    let server = start(MockBehavior {
        malformed_auth: true,
        ..MockBehavior::default()
    })
    .await;

    let report = SuiteRunner::new(config_for(&server), StepRegistry::standard())
        .run()
        .await;

    assert_setup_failed(&report);
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_e2e_missing_access_token() {
    let server = start(MockBehavior {
        auth_without_token: true,
        ..MockBehavior::default()
    })
    .await;

    let report = SuiteRunner::new(config_for(&server), StepRegistry::standard())
        .run()
        .await;

    let error = assert_setup_failed(&report);
    assert!(error.contains("accessToken"), "unexpected setup error: {error}");
}

#[tokio::test]
async fn test_e2e_unreachable_host() {
    let server = start(MockBehavior::default()).await;
    let config = config_for(&server);
    drop(server);

    let report = SuiteRunner::new(config, StepRegistry::extended()).run().await;

    assert_setup_failed(&report);
    assert_eq!(report.steps.len(), 11);
}

#[tokio::test]
async fn test_e2e_check_authentication() {
    let server = start(MockBehavior::default()).await;
    let runner = SuiteRunner::new(config_for(&server), StepRegistry::standard());
    runner
        .check_authentication()
        .await
        .expect("valid credentials should authenticate");

    let mut config = config_for(&server);
    config.credentials.username = "nobody".to_owned();
    let runner = SuiteRunner::new(config, StepRegistry::standard());
    assert!(runner.check_authentication().await.is_err());
}
