//! E2E test scenarios.

mod full_sequence;
mod malformed_bodies;
mod negative_paths;
mod properties;
mod setup_failure;
mod timeouts;
