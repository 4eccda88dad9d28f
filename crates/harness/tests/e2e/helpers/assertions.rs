//! Report assertions.

use spoiler_harness::{StepFailure, StepOutcome, SuiteReport};

/// Assert the named step passed, printing its failure otherwise.
#[allow(dead_code)]
pub fn assert_passed(report: &SuiteReport, name: &str) {
    let step = report
        .step(name)
        .unwrap_or_else(|| panic!("no step named {name}"));
    assert!(
        step.outcome.is_passed(),
        "step {name} should pass, got {:?}",
        step.outcome
    );
}

/// Assert the named step failed and return the failure.
#[allow(dead_code)]
pub fn assert_failed<'a>(report: &'a SuiteReport, name: &str) -> &'a StepFailure {
    let step = report
        .step(name)
        .unwrap_or_else(|| panic!("no step named {name}"));
    step.outcome
        .failure()
        .unwrap_or_else(|| panic!("step {name} should fail, got {:?}", step.outcome))
}

/// Assert every step passed.
#[allow(dead_code)]
pub fn assert_all_passed(report: &SuiteReport) {
    assert!(report.setup_error.is_none(), "setup failed: {:?}", report.setup_error);
    for step in &report.steps {
        assert!(
            step.outcome.is_passed(),
            "step {} ({}) should pass, got {:?}",
            step.order,
            step.name,
            step.outcome
        );
    }
}

/// Assert setup failed and no step ran.
#[allow(dead_code)]
pub fn assert_setup_failed(report: &SuiteReport) -> &str {
    let error = report
        .setup_error
        .as_deref()
        .expect("setup should have failed");
    assert!(!report.steps.is_empty());
    assert!(
        report
            .steps
            .iter()
            .all(|s| matches!(s.outcome, StepOutcome::NotRun { .. })),
        "no step should run after setup failure"
    );
    assert_eq!(report.not_run(), report.steps.len());
    assert!(!report.is_success());
    error
}
