//! Route table of the Story Spoiler API.

use reqwest::{Method, Url};

use spoiler_core::error::RequestError;
use spoiler_core::types::StoryId;

/// One remote operation, with any path parameter it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `POST /api/User/Authentication`
    Authenticate,
    /// `POST /api/Story/Create`
    CreateStory,
    /// `PUT /api/Story/Edit/{id}`
    EditStory(&'a StoryId),
    /// `GET /api/Story/All`
    ListStories,
    /// `DELETE /api/Story/Delete/{id}`
    DeleteStory(&'a StoryId),
}

impl Endpoint<'_> {
    pub fn method(&self) -> Method {
        match self {
            Self::Authenticate | Self::CreateStory => Method::POST,
            Self::EditStory(_) => Method::PUT,
            Self::ListStories => Method::GET,
            Self::DeleteStory(_) => Method::DELETE,
        }
    }

    /// Short label used in logs and error messages.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::CreateStory => "create story",
            Self::EditStory(_) => "edit story",
            Self::ListStories => "list stories",
            Self::DeleteStory(_) => "delete story",
        }
    }

    fn segments(&self) -> Vec<&str> {
        match self {
            Self::Authenticate => vec!["api", "User", "Authentication"],
            Self::CreateStory => vec!["api", "Story", "Create"],
            Self::EditStory(id) => vec!["api", "Story", "Edit", id.as_str()],
            Self::ListStories => vec!["api", "Story", "All"],
            Self::DeleteStory(id) => vec!["api", "Story", "Delete", id.as_str()],
        }
    }

    /// Resolve against `base`. Ids are percent-encoded as a single path segment.
    pub fn url(&self, base: &Url) -> Result<Url, RequestError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| RequestError::Transport {
                operation: self.operation().to_owned(),
                reason: format!("base url '{base}' cannot carry a path"),
            })?
            .pop_if_empty()
            .extend(self.segments());
        Ok(url)
    }
}

/// Parse the configured base URL.
pub fn parse_base_url(base_url: &str) -> Result<Url, RequestError> {
    Url::parse(base_url).map_err(|e| RequestError::ClientBuild {
        reason: format!("invalid base url '{base_url}': {e}"),
    })
}
