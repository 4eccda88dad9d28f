//! Error types: one enum per failure domain

/// Top-level error for the Story Spoiler suite
#[derive(Debug, thiserror::Error)]
pub enum SpoilerError {
    /// Configuration loading or validation
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// One-time authentication (setup phase)
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A single HTTP exchange
    #[error("request error: {0}")]
    Request(#[from] RequestError),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file does not exist
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// Config file is not valid TOML or has the wrong shape
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// A value is outside its allowed range or set
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Failures while exchanging credentials for a bearer token
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The endpoint answered with a non-success status
    #[error("credentials rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The response had no usable `accessToken`
    #[error("response did not contain a non-empty accessToken")]
    MissingToken,

    /// The response body was not JSON
    #[error("malformed authentication response: {reason}")]
    Malformed { reason: String },

    /// The request itself failed
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Failures of a single HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// No response within the configured timeout
    #[error("{operation} timed out")]
    Timeout { operation: String },

    /// Connection refused, DNS failure, TLS failure, etc.
    #[error("{operation} failed: {reason}")]
    Transport { operation: String, reason: String },

    /// The body could not be decoded into the expected shape
    #[error("{operation} returned an undecodable body: {reason}")]
    Decode { operation: String, reason: String },

    /// The HTTP client could not be constructed
    #[error("failed to build http client: {reason}")]
    ClientBuild { reason: String },
}
