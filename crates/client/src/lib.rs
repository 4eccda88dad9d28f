//! HTTP client for the Story Spoiler API.
//!
//! [`LoginClient`] performs the one-time token exchange and yields a
//! [`StorySession`], which implements [`StoryApi`] for the story routes.

pub mod api;
pub mod endpoint;
pub mod response;
pub mod session;

pub use api::{BoxFuture, DynStoryApi, StoryApi};
pub use endpoint::Endpoint;
pub use response::ApiResponse;
pub use session::{LoginClient, StorySession};
