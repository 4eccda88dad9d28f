//! Raw HTTP response capture.

use serde::de::DeserializeOwned;

use spoiler_core::error::RequestError;

/// Status and body of one exchange, kept undecoded.
///
/// Status and substring checks never depend on the body being valid JSON;
/// decoding is a separate, explicit step via [`json`](Self::json).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    operation: &'static str,
    status: u16,
    body: String,
}

impl ApiResponse {
    pub fn new(operation: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            operation,
            status,
            body: body.into(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }

    /// Decode the body as `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        serde_json::from_str(&self.body).map_err(|e| RequestError::Decode {
            operation: self.operation.to_owned(),
            reason: e.to_string(),
        })
    }
}
