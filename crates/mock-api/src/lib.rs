//! In-process Story Spoiler API.
//!
//! Implements the five routes the suite talks to, with the same status codes
//! and messages as the real deployment, plus fault knobs for exercising the
//! suite's failure paths. Binds `127.0.0.1:0`; the server task is aborted
//! when the [`MockStoryServer`] is dropped.
//!
//! ```no_run
//! # async fn example() -> std::io::Result<()> {
//! use spoiler_mock_api::{MockBehavior, MockStoryServer};
//!
//! let server = MockStoryServer::start_with(MockBehavior::default()).await?;
//! let base_url = server.base_url();
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use spoiler_core::types::{StoryDraft, StoryEnvelope, StoryId};

/// Messages the real API sends back.
pub mod messages {
    pub const CREATED: &str = "Successfully created!";
    pub const EDITED: &str = "Successfully edited";
    pub const DELETED: &str = "Deleted successfully!";
    pub const NOT_FOUND: &str = "No spoilers...";
    pub const DELETE_FAILED: &str = "Unable to delete this story spoiler!";
}

/// Knobs controlling how the mock deviates from a conforming API.
#[derive(Debug, Clone)]
pub struct MockBehavior {
    /// Accepted login
    pub username: String,
    pub password: String,
    /// Token issued on login; story routes require `Bearer <token>`
    pub token: String,
    /// Login answers 200 with a non-JSON body
    pub malformed_auth: bool,
    /// Login answers 200 JSON without `accessToken`
    pub auth_without_token: bool,
    /// Create answers 201 with a non-JSON body (story is still stored)
    pub malformed_create: bool,
    /// Listing answers 200 with a non-JSON body
    pub malformed_list: bool,
    /// Edit answers 200 but with a different `msg`
    pub wrong_edit_message: bool,
    /// Every story route sleeps this long before answering
    pub story_delay: Option<Duration>,
    /// Stories present before the suite starts
    pub seed_stories: usize,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            username: "vili".to_owned(),
            password: "vili123".to_owned(),
            token: "mock-access-token".to_owned(),
            malformed_auth: false,
            auth_without_token: false,
            malformed_create: false,
            malformed_list: false,
            wrong_edit_message: false,
            story_delay: None,
            seed_stories: 0,
        }
    }
}

/// A request as the mock saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct Store {
    stories: BTreeMap<String, StoryDraft>,
    requests: Vec<RecordedRequest>,
}

struct MockState {
    behavior: MockBehavior,
    store: Mutex<Store>,
}

impl MockState {
    fn store(&self) -> MutexGuard<'_, Store> {
        // a poisoned lock only means another handler panicked; the data is still usable
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn authorized(&self, request: &Request) -> bool {
        let expected = format!("Bearer {}", self.behavior.token);
        request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == expected)
    }

    async fn delay(&self) {
        if let Some(delay) = self.behavior.story_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

type Shared = Arc<MockState>;

/// Running mock server.
pub struct MockStoryServer {
    addr: SocketAddr,
    state: Shared,
    task: JoinHandle<()>,
}

impl MockStoryServer {
    /// Start a conforming server.
    pub async fn start() -> std::io::Result<Self> {
        Self::start_with(MockBehavior::default()).await
    }

    /// Start a server with the given behavior.
    pub async fn start_with(behavior: MockBehavior) -> std::io::Result<Self> {
        let mut store = Store::default();
        for n in 0..behavior.seed_stories {
            store.stories.insert(
                uuid::Uuid::new_v4().to_string(),
                StoryDraft::new(format!("Seed story {n}"), "Seeded before the run"),
            );
        }

        let state = Arc::new(MockState {
            behavior,
            store: Mutex::new(store),
        });

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(Arc::clone(&state));
        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock story server stopped");
            }
        });

        tracing::debug!(%addr, "mock story server listening");
        Ok(Self { addr, state, task })
    }

    /// `http://127.0.0.1:<port>`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn behavior(&self) -> &MockBehavior {
        &self.state.behavior
    }

    /// Number of stories currently stored.
    pub fn story_count(&self) -> usize {
        self.state.store().stories.len()
    }

    pub fn contains_story(&self, id: &StoryId) -> bool {
        self.state.store().stories.contains_key(id.as_str())
    }

    pub fn story(&self, id: &StoryId) -> Option<StoryDraft> {
        self.state.store().stories.get(id.as_str()).cloned()
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.store().requests.clone()
    }
}

impl Drop for MockStoryServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/User/Authentication", post(authenticate))
        .route("/api/Story/Create", post(create_story))
        .route("/api/Story/Edit/:id", put(edit_story))
        .route("/api/Story/All", get(list_stories))
        .route("/api/Story/Delete/:id", delete(delete_story))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            record_and_authorize,
        ))
        .with_state(state)
}

/// Logs every request; rejects story routes without the issued bearer token.
async fn record_and_authorize(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    state.store().requests.push(RecordedRequest {
        method: request.method().to_string(),
        path: path.clone(),
        authorization,
    });

    if path.starts_with("/api/Story/") && !state.authorized(&request) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "Unauthorized" }))).into_response();
    }
    next.run(request).await
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn authenticate(State(state): State<Shared>, Json(login): Json<LoginBody>) -> Response {
    let behavior = &state.behavior;
    if login.username != behavior.username || login.password != behavior.password {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "Invalid username or password" })),
        )
            .into_response();
    }
    if behavior.malformed_auth {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    if behavior.auth_without_token {
        return (StatusCode::OK, Json(json!({ "username": login.username }))).into_response();
    }
    (
        StatusCode::OK,
        Json(json!({
            "username": login.username,
            "accessToken": behavior.token,
        })),
    )
        .into_response()
}

async fn create_story(State(state): State<Shared>, Json(draft): Json<StoryDraft>) -> Response {
    state.delay().await;
    if !draft.has_required_fields() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "msg": "Title and description are required." })),
        )
            .into_response();
    }

    let id = uuid::Uuid::new_v4().to_string();
    state.store().stories.insert(id.clone(), draft);

    if state.behavior.malformed_create {
        return (StatusCode::CREATED, messages::CREATED).into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({ "storyId": id, "msg": messages::CREATED })),
    )
        .into_response()
}

async fn edit_story(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(draft): Json<StoryDraft>,
) -> Response {
    state.delay().await;
    let mut store = state.store();
    let Some(story) = store.stories.get_mut(&id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "msg": messages::NOT_FOUND }))).into_response();
    };
    if !draft.has_required_fields() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "msg": "Title and description are required." })),
        )
            .into_response();
    }
    *story = draft;

    let msg = if state.behavior.wrong_edit_message {
        "Edited, probably"
    } else {
        messages::EDITED
    };
    (StatusCode::OK, Json(json!({ "msg": msg }))).into_response()
}

async fn list_stories(State(state): State<Shared>) -> Response {
    state.delay().await;
    if state.behavior.malformed_list {
        return (StatusCode::OK, "stories: many").into_response();
    }
    let stories: Vec<StoryEnvelope> = state
        .store()
        .stories
        .iter()
        .map(|(id, draft)| StoryEnvelope {
            story_id: Some(StoryId::new(id.as_str())),
            title: Some(draft.title.clone()),
            description: Some(draft.description.clone()),
            url: Some(draft.url.clone()),
        })
        .collect();
    (StatusCode::OK, Json(stories)).into_response()
}

async fn delete_story(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    state.delay().await;
    if state.store().stories.remove(&id).is_some() {
        (StatusCode::OK, Json(json!({ "msg": messages::DELETED }))).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "msg": messages::DELETE_FAILED })),
        )
            .into_response()
    }
}
