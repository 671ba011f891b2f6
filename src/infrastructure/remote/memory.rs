//! In-memory remote resource for offline mode and testing

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{Post, PostDraft, PostId, RemoteError, RemoteResource, RemoteResult};

/// Remote operations, used to inject failures and count calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOp {
    FetchAll,
    Create,
    Update,
    Delete,
}

/// In-process stand-in for the posts API.
///
/// Ids are assigned like the real server (one past the highest id seen).
/// Unknown ids on update are rejected, deletes always succeed.
pub struct InMemoryRemote {
    posts: DashMap<PostId, Post>,
    next_id: AtomicI64,
    failures: DashMap<RemoteOp, String>,
    calls: DashMap<RemoteOp, usize>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            posts: posts.into_iter().map(|p| (p.id, p)).collect(),
            next_id: AtomicI64::new(next_id),
            failures: DashMap::new(),
            calls: DashMap::new(),
        }
    }

    /// `count` generated posts, ten per user, like the public demo data
    pub fn sample(count: usize) -> Self {
        let posts = (1..=count as PostId)
            .map(|id| Post {
                user_id: Some((id - 1) / 10 + 1),
                id,
                title: format!("Sample post {}", id),
                body: format!("Body of sample post {}.\nSecond line.", id),
            })
            .collect();
        Self::with_posts(posts)
    }

    /// Make the next call of `op` fail with `message`.
    pub fn fail_next(&self, op: RemoteOp, message: impl Into<String>) {
        self.failures.insert(op, message.into());
    }

    /// Insert or overwrite a post behind the client's back.
    pub fn insert(&self, post: Post) {
        self.next_id.fetch_max(post.id + 1, Ordering::SeqCst);
        self.posts.insert(post.id, post);
    }

    /// How many times `op` was attempted
    pub fn call_count(&self, op: RemoteOp) -> usize {
        self.calls.get(&op).map(|c| *c).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn attempt(&self, op: RemoteOp) -> RemoteResult<()> {
        *self.calls.entry(op).or_insert(0) += 1;
        match self.failures.remove(&op) {
            Some((_, message)) => Err(RemoteError::Unavailable(message)),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryRemote {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteResource for InMemoryRemote {
    async fn fetch_all(&self) -> RemoteResult<Vec<Post>> {
        self.attempt(RemoteOp::FetchAll)?;
        let mut posts: Vec<Post> = self.posts.iter().map(|e| e.value().clone()).collect();
        posts.sort_by_key(|p| p.id);
        Ok(posts)
    }

    async fn create(&self, draft: &PostDraft) -> RemoteResult<Post> {
        self.attempt(RemoteOp::Create)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let post = Post {
            user_id: draft.user_id,
            id,
            title: draft.title.clone(),
            body: draft.body.clone(),
        };
        self.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: &Post) -> RemoteResult<Post> {
        self.attempt(RemoteOp::Update)?;
        match self.posts.get_mut(&post.id) {
            Some(mut existing) => {
                *existing = post.clone();
                Ok(post.clone())
            }
            None => Err(RemoteError::Status {
                status: 404,
                message: format!("post {} not found", post.id),
            }),
        }
    }

    async fn delete(&self, id: PostId) -> RemoteResult<()> {
        self.attempt(RemoteOp::Delete)?;
        self.posts.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_all_is_ordered_by_id() {
        let remote = InMemoryRemote::with_posts(vec![
            Post::new(3, "C", "c"),
            Post::new(1, "A", "a"),
            Post::new(2, "B", "b"),
        ]);

        let ids: Vec<PostId> = remote.fetch_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn create_assigns_next_id() {
        let remote = InMemoryRemote::sample(100);

        let post = remote.create(&PostDraft::new("New", "N")).await.unwrap();

        assert_eq!(post.id, 101);
        assert_eq!(remote.len(), 101);
    }

    #[tokio::test]
    async fn injected_failure_fires_once() {
        let remote = InMemoryRemote::sample(3);
        remote.fail_next(RemoteOp::Delete, "offline");

        let err = remote.delete(1).await.unwrap_err();
        assert!(matches!(err, RemoteError::Unavailable(ref m) if m == "offline"));
        assert_eq!(remote.len(), 3);

        remote.delete(1).await.unwrap();
        assert_eq!(remote.len(), 2);
        assert_eq!(remote.call_count(RemoteOp::Delete), 2);
    }

    #[tokio::test]
    async fn update_of_unknown_post_is_rejected() {
        let remote = InMemoryRemote::sample(3);

        let err = remote.update(&Post::new(9, "X", "x")).await.unwrap_err();

        assert!(matches!(err, RemoteError::Status { status: 404, .. }));
    }

    #[test]
    fn insert_moves_id_counter_forward() {
        let remote = InMemoryRemote::sample(2);
        remote.insert(Post::new(50, "Z", "z"));
        assert_eq!(remote.next_id.load(Ordering::SeqCst), 51);
    }

    #[test]
    fn sample_groups_ten_posts_per_user() {
        let remote = InMemoryRemote::sample(20);
        assert_eq!(remote.posts.get(&10).unwrap().user_id, Some(1));
        assert_eq!(remote.posts.get(&11).unwrap().user_id, Some(2));
    }
}
