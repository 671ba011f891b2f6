//! Remote resource interface

use async_trait::async_trait;

use super::model::{Post, PostDraft, PostId};
use crate::domain::RemoteResult;

/// CRUD operations on the remote posts resource.
///
/// Each call is a single attempt. Implementations never retry.
#[async_trait]
pub trait RemoteResource: Send + Sync {
    /// `GET /posts`
    async fn fetch_all(&self) -> RemoteResult<Vec<Post>>;
    /// `POST /posts`, returns the post with its server-assigned id
    async fn create(&self, draft: &PostDraft) -> RemoteResult<Post>;
    /// `PUT /posts/{id}`, returns whatever the server echoes back
    async fn update(&self, post: &Post) -> RemoteResult<Post>;
    /// `DELETE /posts/{id}`
    async fn delete(&self, id: PostId) -> RemoteResult<()>;
}
