//! The seam between suite steps and the transport.
//!
//! [`StoryApi`] is what an authenticated session can do. Steps receive it as
//! `&dyn DynStoryApi`, so tests can substitute an in-memory implementation.

use std::future::Future;
use std::pin::Pin;

use spoiler_core::error::RequestError;
use spoiler_core::types::{StoryDraft, StoryId};

use crate::response::ApiResponse;

/// Boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Story operations available once authenticated.
///
/// Every method resolves to the raw response on any HTTP status;
/// `Err` is reserved for transport failures and timeouts.
pub trait StoryApi: Send + Sync {
    /// `POST /api/Story/Create`
    fn create(
        &self,
        draft: &StoryDraft,
    ) -> impl Future<Output = Result<ApiResponse, RequestError>> + Send;

    /// `PUT /api/Story/Edit/{id}`
    fn edit(
        &self,
        id: &StoryId,
        draft: &StoryDraft,
    ) -> impl Future<Output = Result<ApiResponse, RequestError>> + Send;

    /// `GET /api/Story/All`
    fn list(&self) -> impl Future<Output = Result<ApiResponse, RequestError>> + Send;

    /// `DELETE /api/Story/Delete/{id}`
    fn delete(&self, id: &StoryId) -> impl Future<Output = Result<ApiResponse, RequestError>> + Send;
}

/// dyn-compatible form of [`StoryApi`].
///
/// `StoryApi` returns `impl Future`, which rules out `dyn StoryApi`.
/// Every `StoryApi` gets this for free through the blanket impl below.
pub trait DynStoryApi: Send + Sync {
    fn create<'a>(&'a self, draft: &'a StoryDraft)
    -> BoxFuture<'a, Result<ApiResponse, RequestError>>;

    fn edit<'a>(
        &'a self,
        id: &'a StoryId,
        draft: &'a StoryDraft,
    ) -> BoxFuture<'a, Result<ApiResponse, RequestError>>;

    fn list(&self) -> BoxFuture<'_, Result<ApiResponse, RequestError>>;

    fn delete<'a>(&'a self, id: &'a StoryId) -> BoxFuture<'a, Result<ApiResponse, RequestError>>;
}

impl<T: StoryApi> DynStoryApi for T {
    fn create<'a>(
        &'a self,
        draft: &'a StoryDraft,
    ) -> BoxFuture<'a, Result<ApiResponse, RequestError>> {
        Box::pin(StoryApi::create(self, draft))
    }

    fn edit<'a>(
        &'a self,
        id: &'a StoryId,
        draft: &'a StoryDraft,
    ) -> BoxFuture<'a, Result<ApiResponse, RequestError>> {
        Box::pin(StoryApi::edit(self, id, draft))
    }

    fn list(&self) -> BoxFuture<'_, Result<ApiResponse, RequestError>> {
        Box::pin(StoryApi::list(self))
    }

    fn delete<'a>(&'a self, id: &'a StoryId) -> BoxFuture<'a, Result<ApiResponse, RequestError>> {
        Box::pin(StoryApi::delete(self, id))
    }
}
