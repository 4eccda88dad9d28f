#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod types;

// errors
pub use error::{AuthError, ConfigError, RequestError, SpoilerError};

// config
pub use config::SpoilerConfig;

// domain types
pub use types::{ApiMessage, AuthResponse, Credentials, StoryDraft, StoryEnvelope, StoryId};
