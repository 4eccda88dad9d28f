//! Login and the bearer-authenticated story session.
//!
//! ```text
//! LoginClient::new(config) → authenticate(credentials) → StorySession → close()
//! ```
//!
//! A [`StorySession`] owns the only copy of the bearer token. Every request
//! it sends carries `Authorization: Bearer <token>` as a default header.

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{debug, info, warn};

use spoiler_core::config::ApiConfig;
use spoiler_core::error::{AuthError, RequestError};
use spoiler_core::types::{AuthResponse, Credentials, StoryDraft, StoryId};

use crate::api::StoryApi;
use crate::endpoint::{Endpoint, parse_base_url};
use crate::response::ApiResponse;

/// Unauthenticated client, used only for the token exchange.
pub struct LoginClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl LoginClient {
    /// Build a client for `config.base_url` with `config.timeout()` on every request.
    pub fn new(config: &ApiConfig) -> Result<Self, RequestError> {
        let base_url = parse_base_url(&config.base_url)?;
        let timeout = config.timeout();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RequestError::ClientBuild {
                reason: e.to_string(),
            })?;
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// Exchange credentials for a token and open a session with it.
    ///
    /// Any non-2xx status, undecodable body, or missing/empty `accessToken`
    /// is an error: no session without a usable token.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<StorySession, AuthError> {
        info!(
            base_url = %self.base_url,
            username = %credentials.username,
            "authenticating"
        );

        let response = execute(
            &self.http,
            &self.base_url,
            Endpoint::Authenticate,
            Some(credentials),
        )
        .await?;

        if !response.is_success() {
            warn!(status = response.status(), "authentication rejected");
            return Err(AuthError::Rejected {
                status: response.status(),
                body: response.body().to_owned(),
            });
        }

        let auth: AuthResponse = response.json().map_err(|e| AuthError::Malformed {
            reason: e.to_string(),
        })?;
        let token = auth
            .access_token
            .filter(|token| !token.trim().is_empty())
            .ok_or(AuthError::MissingToken)?;

        let session = StorySession::with_token(self.base_url.clone(), self.timeout, &token)?;
        info!("authenticated, session opened");
        Ok(session)
    }
}

/// Bearer-authenticated client for the story endpoints.
pub struct StorySession {
    http: Client,
    base_url: Url,
}

impl StorySession {
    /// Login with `credentials` against `config` in one call.
    pub async fn open(config: &ApiConfig, credentials: &Credentials) -> Result<Self, AuthError> {
        LoginClient::new(config)?.authenticate(credentials).await
    }

    fn with_token(base_url: Url, timeout: Duration, token: &str) -> Result<Self, AuthError> {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| AuthError::Malformed {
                reason: format!("accessToken is not a valid header value: {e}"),
            })?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| RequestError::ClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Release the session. The token and connection pool are dropped here.
    pub fn close(self) {
        debug!(base_url = %self.base_url, "closing story session");
        drop(self.http);
    }
}

impl StoryApi for StorySession {
    async fn create(&self, draft: &StoryDraft) -> Result<ApiResponse, RequestError> {
        execute(&self.http, &self.base_url, Endpoint::CreateStory, Some(draft)).await
    }

    async fn edit(&self, id: &StoryId, draft: &StoryDraft) -> Result<ApiResponse, RequestError> {
        execute(&self.http, &self.base_url, Endpoint::EditStory(id), Some(draft)).await
    }

    async fn list(&self) -> Result<ApiResponse, RequestError> {
        execute::<()>(&self.http, &self.base_url, Endpoint::ListStories, None).await
    }

    async fn delete(&self, id: &StoryId) -> Result<ApiResponse, RequestError> {
        execute::<()>(&self.http, &self.base_url, Endpoint::DeleteStory(id), None).await
    }
}

/// Send one request, exactly once, and capture status + body.
async fn execute<B>(
    http: &Client,
    base_url: &Url,
    endpoint: Endpoint<'_>,
    body: Option<&B>,
) -> Result<ApiResponse, RequestError>
where
    B: Serialize + Sync + ?Sized,
{
    let operation = endpoint.operation();
    let url = endpoint.url(base_url)?;
    let method = endpoint.method();
    debug!(operation, %method, path = url.path(), "sending request");

    let started = Instant::now();
    let mut request = http.request(method, url);
    if let Some(body) = body {
        request = request.json(body);
    }

    let response = request
        .send()
        .await
        .map_err(|e| classify(operation, &e))?;
    let status = response.status().as_u16();
    let text = response.text().await.map_err(|e| classify(operation, &e))?;

    debug!(
        operation,
        status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "response received"
    );
    Ok(ApiResponse::new(operation, status, text))
}

fn classify(operation: &str, err: &reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::Timeout {
            operation: operation.to_owned(),
        };
    }

    let mut reason = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    RequestError::Transport {
        operation: operation.to_owned(),
        reason,
    }
}
