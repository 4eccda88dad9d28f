//! Mock server and runner construction.

use spoiler_core::config::SpoilerConfig;
use spoiler_harness::{StepRegistry, SuiteReport, SuiteRunner};
use spoiler_mock_api::{MockBehavior, MockStoryServer};

/// Config pointing at `server` with the mock's default credentials.
pub fn config_for(server: &MockStoryServer) -> SpoilerConfig {
    let mut config = SpoilerConfig::default();
    config.api.base_url = server.base_url();
    config.api.timeout_secs = 5;
    config.credentials.username = server.behavior().username.clone();
    config.credentials.password = server.behavior().password.clone();
    config
}

/// Start a mock with `behavior`.
pub async fn start(behavior: MockBehavior) -> MockStoryServer {
    MockStoryServer::start_with(behavior)
        .await
        .expect("mock server should bind")
}

/// Start a mock with `behavior` and run the standard suite against it.
#[allow(dead_code)]
pub async fn run_standard(behavior: MockBehavior) -> (MockStoryServer, SuiteReport) {
    let server = start(behavior).await;
    let report = SuiteRunner::new(config_for(&server), StepRegistry::standard())
        .run()
        .await;
    (server, report)
}

/// Start a mock with `behavior` and run the extended suite against it.
#[allow(dead_code)]
pub async fn run_extended(behavior: MockBehavior) -> (MockStoryServer, SuiteReport) {
    let server = start(behavior).await;
    let report = SuiteRunner::new(config_for(&server), StepRegistry::extended())
        .run()
        .await;
    (server, report)
}
