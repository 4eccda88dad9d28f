//! Command handlers -- one module per subcommand

pub mod auth;
pub mod config;
pub mod run;

use std::path::{Path, PathBuf};

use spoiler_core::config::SpoilerConfig;
use spoiler_core::error::SpoilerError;

use crate::cli::DEFAULT_CONFIG_PATH;
use crate::error::CliError;

/// Where the configuration comes from.
///
/// An explicit `--config` path must exist; the implicit default may be absent,
/// in which case built-in defaults plus environment overrides apply.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    path: PathBuf,
    explicit: bool,
}

impl ConfigSource {
    pub fn new(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) => Self {
                path,
                explicit: true,
            },
            None => Self {
                path: PathBuf::from(DEFAULT_CONFIG_PATH),
                explicit: false,
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load, apply environment overrides and validate.
    pub async fn load(&self) -> Result<SpoilerConfig, SpoilerError> {
        if self.explicit {
            SpoilerConfig::load(&self.path).await
        } else {
            SpoilerConfig::load_or_default(&self.path).await
        }
    }

    /// [`load`](Self::load), then apply a `--log-level` flag on top.
    pub async fn load_with_overrides(
        &self,
        log_level: Option<&str>,
    ) -> Result<SpoilerConfig, CliError> {
        let mut config = self.load().await?;
        if let Some(level) = log_level {
            config.general.log_level = level.to_owned();
            config.validate()?;
        }
        Ok(config)
    }
}
