//! Configuration: `spoiler.toml` parsing and runtime settings
//!
//! [`SpoilerConfig`] is the top-level structure holding every section.
//!
//! # Loading priority
//! 1. CLI flags (highest)
//! 2. Environment variables (`SPOILER_API_BASE_URL=http://...` form)
//! 3. Config file (`spoiler.toml`)
//! 4. Defaults (`Default` impls)
//!
//! # Example
//! ```no_run
//! # async fn example() -> Result<(), spoiler_core::error::SpoilerError> {
//! use spoiler_core::config::SpoilerConfig;
//!
//! // file + env overrides
//! let config = SpoilerConfig::load("spoiler.toml").await?;
//!
//! // straight from a TOML string
//! let config = SpoilerConfig::parse("[api]\ntimeout_secs = 10")?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, SpoilerError};
use crate::types::Credentials;

/// Default Story Spoiler deployment under test.
pub const DEFAULT_BASE_URL: &str = "https://d3s5nxhwblsjbi.cloudfront.net";

/// Upper bound accepted for `api.timeout_secs`.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Suite configuration
///
/// Mirrors the top level of `spoiler.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpoilerConfig {
    /// Logging
    #[serde(default)]
    pub general: GeneralConfig,
    /// Remote API location and transport settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Login used for the one-time token exchange
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl SpoilerConfig {
    /// Load a TOML file, apply environment overrides, then validate.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SpoilerError> {
        let mut config = Self::read_file(path.as_ref()).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields defaults.
    ///
    /// Used when the path was not given explicitly on the command line.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SpoilerError> {
        let path = path.as_ref();
        let mut config = match Self::read_file(path).await {
            Ok(config) => config,
            Err(SpoilerError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file absent, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file without environment overrides.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SpoilerError> {
        let config = Self::read_file(path.as_ref()).await?;
        config.validate()?;
        Ok(config)
    }

    async fn read_file(path: &Path) -> Result<Self, SpoilerError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpoilerError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                SpoilerError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Parse a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, SpoilerError> {
        toml::from_str(toml_str).map_err(|e| {
            SpoilerError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// Override values from the environment.
    ///
    /// Naming rule: `SPOILER_{SECTION}_{FIELD}`, e.g. `SPOILER_API_TIMEOUT_SECS=10`.
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "SPOILER_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "SPOILER_GENERAL_LOG_FORMAT");

        override_string(&mut self.api.base_url, "SPOILER_API_BASE_URL");
        override_u64(&mut self.api.timeout_secs, "SPOILER_API_TIMEOUT_SECS");

        override_string(
            &mut self.credentials.username,
            "SPOILER_CREDENTIALS_USERNAME",
        );
        override_string(
            &mut self.credentials.password,
            "SPOILER_CREDENTIALS_PASSWORD",
        );
    }

    /// Check every field against its allowed values.
    pub fn validate(&self) -> Result<(), SpoilerError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        if self.api.base_url.trim().is_empty() {
            return Err(invalid("api.base_url", "must not be empty".to_owned()));
        }
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err(invalid(
                "api.base_url",
                "must start with http:// or https://".to_owned(),
            ));
        }

        if self.api.timeout_secs == 0 || self.api.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(invalid(
                "api.timeout_secs",
                format!("must be between 1 and {MAX_TIMEOUT_SECS}"),
            ));
        }

        if self.credentials.username.is_empty() {
            return Err(invalid(
                "credentials.username",
                "must not be empty".to_owned(),
            ));
        }
        if self.credentials.password.is_empty() {
            return Err(invalid(
                "credentials.password",
                "must not be empty".to_owned(),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> SpoilerError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    }
    .into()
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// trace, debug, info, warn, error
    pub log_level: String,
    /// json, pretty
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme + host of the deployment, no trailing path
    pub base_url: String,
    /// Per-request timeout (seconds), applied to every call including login
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: 30,
        }
    }
}

/// Login credentials
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: String,
}

impl CredentialsConfig {
    /// Request body for the token exchange.
    pub fn to_credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            username: "vili".to_owned(),
            password: "vili123".to_owned(),
        }
    }
}

// --- env override helpers ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}
