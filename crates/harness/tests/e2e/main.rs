//! E2E tests for the conformance suite.
//!
//! Every test starts its own in-process mock of the Story Spoiler API on
//! `127.0.0.1:0` and runs the real [`SuiteRunner`](spoiler_harness::SuiteRunner)
//! over HTTP against it.
//!
//! # Test Structure
//!
//! - `helpers/` -- mock server setup, config builder, report assertions
//! - `scenarios/` -- one file per behavior under test
//!
//! # Running
//!
//! ```bash
//! cargo test -p spoiler-harness --test e2e
//! ```

mod helpers;
mod scenarios;
