//! CLI-specific error types and exit code mapping

use spoiler_core::error::SpoilerError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Authentication did not yield a session; no step ran.
    #[error("setup failed: {0}")]
    Setup(String),

    /// The suite ran and at least one step did not pass.
    #[error("{failed} of {total} steps failed")]
    StepsFailed { failed: usize, total: usize },

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 0    | Success                              |
    /// | 1    | Step failures / command error        |
    /// | 2    | Configuration error                  |
    /// | 3    | Setup (authentication) failure       |
    /// | 10   | IO error                             |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Setup(_) => 3,
            Self::Io(_) => 10,
            Self::StepsFailed { .. } | Self::Command(_) | Self::JsonSerialize(_) => 1,
        }
    }
}

impl From<SpoilerError> for CliError {
    fn from(e: SpoilerError) -> Self {
        match e {
            SpoilerError::Config(e) => Self::Config(e.to_string()),
            SpoilerError::Auth(e) => Self::Setup(e.to_string()),
            SpoilerError::Io(e) => Self::Io(e),
            SpoilerError::Request(e) => Self::Command(e.to_string()),
        }
    }
}
