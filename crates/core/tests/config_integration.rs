//! spoiler.toml integration tests
//!
//! - spoiler.toml.example parsing
//! - partial configs (some sections only)
//! - environment variable precedence
//! - empty / malformed files and file loading

use spoiler_core::config::{DEFAULT_BASE_URL, SpoilerConfig};
use spoiler_core::error::{ConfigError, SpoilerError};

const EXAMPLE: &str = include_str!("../../../spoiler.toml.example");

/// Set `key` for the duration of `f`, then restore its previous value.
fn with_env<T>(key: &str, value: &str, f: impl FnOnce() -> T) -> T {
    let original = std::env::var(key).ok();
    // SAFETY: env tests are serialized with #[serial]
    unsafe {
        std::env::set_var(key, value);
    }

    let result = f();

    // SAFETY: same as above
    unsafe {
        match original {
            Some(val) => std::env::set_var(key, val),
            None => std::env::remove_var(key),
        }
    }
    result
}

// =============================================================================
// spoiler.toml.example
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let config = SpoilerConfig::parse(EXAMPLE).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "pretty");
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.credentials.username, "vili");
}

#[test]
fn example_config_passes_validation() {
    let config = SpoilerConfig::parse(EXAMPLE).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

#[test]
fn example_config_matches_code_defaults() {
    let example = SpoilerConfig::parse(EXAMPLE).expect("should parse");
    let defaults = SpoilerConfig::default();

    assert_eq!(example.general.log_level, defaults.general.log_level);
    assert_eq!(example.general.log_format, defaults.general.log_format);
    assert_eq!(example.api.base_url, defaults.api.base_url);
    assert_eq!(example.api.timeout_secs, defaults.api.timeout_secs);
    assert_eq!(example.credentials.username, defaults.credentials.username);
    assert_eq!(example.credentials.password, defaults.credentials.password);
}

// =============================================================================
// partial configs
// =============================================================================

#[test]
fn partial_config_api_only() {
    let toml = r#"
[api]
base_url = "http://localhost:8080"
"#;
    let config = SpoilerConfig::parse(toml).expect("should parse");

    assert_eq!(config.api.base_url, "http://localhost:8080");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.credentials.username, "vili");
}

#[test]
fn partial_config_credentials_only() {
    let toml = r#"
[credentials]
username = "alice"
"#;
    let config = SpoilerConfig::parse(toml).expect("should parse");

    assert_eq!(config.credentials.username, "alice");
    assert_eq!(config.credentials.password, "vili123");
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
}

// =============================================================================
// environment precedence
// =============================================================================

#[test]
#[serial_test::serial]
fn env_override_takes_precedence_over_toml() {
    let toml = r#"
[api]
base_url = "http://from-file:1"
"#;
    let base_url = with_env("SPOILER_API_BASE_URL", "http://from-env:2", || {
        let mut config = SpoilerConfig::parse(toml).expect("should parse");
        config.apply_env_overrides();
        config.api.base_url
    });

    assert_eq!(base_url, "http://from-env:2");
}

#[test]
#[serial_test::serial]
fn env_override_numeric_field() {
    let timeout = with_env("SPOILER_API_TIMEOUT_SECS", "12", || {
        let mut config = SpoilerConfig::parse("").expect("should parse");
        config.apply_env_overrides();
        config.api.timeout_secs
    });

    assert_eq!(timeout, 12);
}

#[test]
#[serial_test::serial]
fn env_override_credentials() {
    let password = with_env("SPOILER_CREDENTIALS_PASSWORD", "s3cret", || {
        let mut config = SpoilerConfig::parse("").expect("should parse");
        config.apply_env_overrides();
        config.credentials.password
    });

    assert_eq!(password, "s3cret");
}

#[test]
#[serial_test::serial]
fn env_override_missing_var_keeps_toml_value() {
    let toml = r#"
[general]
log_level = "warn"
"#;
    // SAFETY: serialized with #[serial]
    unsafe {
        std::env::remove_var("SPOILER_GENERAL_LOG_LEVEL");
    }

    let mut config = SpoilerConfig::parse(toml).expect("should parse");
    config.apply_env_overrides();

    assert_eq!(config.general.log_level, "warn");
}

#[test]
#[serial_test::serial]
fn env_override_invalid_value_fails_validation() {
    let result = with_env("SPOILER_API_TIMEOUT_SECS", "301", || {
        let mut config = SpoilerConfig::parse("").expect("should parse");
        config.apply_env_overrides();
        config.validate()
    });

    assert!(matches!(
        result,
        Err(SpoilerError::Config(ConfigError::InvalidValue { ref field, .. })) if field == "api.timeout_secs"
    ));
}

// =============================================================================
// empty / malformed input
// =============================================================================

#[test]
fn empty_string_parses_with_defaults() {
    let config = SpoilerConfig::parse("").expect("empty string should parse");
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    config.validate().expect("defaults should validate");
}

#[test]
fn comments_only_parses_with_defaults() {
    let config = SpoilerConfig::parse("# nothing here\n# at all\n").expect("should parse");
    assert_eq!(config.api.timeout_secs, 30);
}

#[test]
fn malformed_toml_returns_parse_error() {
    let result = SpoilerConfig::parse("[api\nbase_url = ");
    assert!(matches!(
        result,
        Err(SpoilerError::Config(ConfigError::ParseFailed { .. }))
    ));
}

#[test]
fn wrong_type_for_numeric_field() {
    let result = SpoilerConfig::parse("[api]\ntimeout_secs = \"thirty\"\n");
    assert!(matches!(
        result,
        Err(SpoilerError::Config(ConfigError::ParseFailed { .. }))
    ));
}

#[test]
fn unknown_section_is_ignored() {
    let toml = r#"
[reporting]
html = true

[api]
timeout_secs = 10
"#;
    let config = SpoilerConfig::parse(toml).expect("unknown sections should be ignored");
    assert_eq!(config.api.timeout_secs, 10);
}

#[test]
fn non_http_base_url_fails_validation() {
    let config = SpoilerConfig::parse("[api]\nbase_url = \"ftp://example.com\"\n").expect("parse");
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("api.base_url"));
}

// =============================================================================
// file loading
// =============================================================================

#[tokio::test]
async fn from_file_nonexistent_returns_file_not_found() {
    let result = SpoilerConfig::from_file("/nonexistent/spoiler.toml").await;
    assert!(matches!(
        result,
        Err(SpoilerError::Config(ConfigError::FileNotFound { .. }))
    ));
}

#[tokio::test]
#[serial_test::serial]
async fn load_or_default_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let config = SpoilerConfig::load_or_default(&path)
        .await
        .expect("missing default file should fall back");
    assert_eq!(config.api.timeout_secs, 30);
}

#[tokio::test]
#[serial_test::serial]
async fn load_reads_file_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("spoiler.toml");
    std::fs::write(&path, "[api]\ntimeout_secs = 7\n").expect("write");

    let config = SpoilerConfig::load(&path).await.expect("should load");
    assert_eq!(config.api.timeout_secs, 7);
    assert_eq!(config.api.timeout(), std::time::Duration::from_secs(7));
}
