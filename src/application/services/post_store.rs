//! Post collection state for one session
//!
//! `PostStore` owns the ordered list of posts, keeps it in step with the
//! outcome of each remote call and derives the visible page. Every remote
//! call is attempted once; on failure the local list stays exactly as it was.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::domain::{Post, PostDraft, PostId, RemoteError, RemoteResource};
use crate::notifications::{
    create_event_bus, ErrorEvent, Event, EventSubscriber, PageChangedEvent, PostCreatedEvent,
    PostRemovedEvent, PostUpdatedEvent, PostsLoadedEvent, SharedEventBus,
};
use crate::shared::{PageView, PaginationParams, StoreError, StoreResult, WriteOp};

/// Load state of the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreState {
    /// Nothing fetched yet
    Unloaded,
    /// Collection reflects the last successful load plus later writes
    Loaded,
    /// Load failed before anything was ever loaded
    LoadFailed(String),
}

/// Result of a successful remote update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Local entry at `index` replaced
    Replaced { index: usize },
    /// Server accepted the update but no local entry has that id.
    /// The local list is left alone; callers may `load()` to resync.
    MissingLocally,
}

/// Result of a successful remote create
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Server copy appended as the last entry
    Appended(Post),
    /// Server answered with an id that was already listed; the entry at
    /// `index` was overwritten instead of adding a second post with that id.
    Replaced { index: usize, post: Post },
}

impl CreateOutcome {
    pub fn post(&self) -> &Post {
        match self {
            Self::Appended(post) | Self::Replaced { post, .. } => post,
        }
    }

    pub fn into_post(self) -> Post {
        match self {
            Self::Appended(post) | Self::Replaced { post, .. } => post,
        }
    }
}

pub struct PostStore {
    remote: Arc<dyn RemoteResource>,
    posts: Vec<Post>,
    state: StoreState,
    current_page: usize,
    page_size: usize,
    default_user_id: Option<i64>,
    events: SharedEventBus,
}

impl PostStore {
    /// New empty store. `page_size` must be non-zero.
    pub fn new(remote: Arc<dyn RemoteResource>, page_size: usize) -> StoreResult<Self> {
        if page_size == 0 {
            return Err(StoreError::InvalidPageSize);
        }
        Ok(Self {
            remote,
            posts: Vec::new(),
            state: StoreState::Unloaded,
            current_page: 1,
            page_size,
            default_user_id: None,
            events: create_event_bus(),
        })
    }

    /// Publish on an existing bus instead of a private one
    pub fn with_event_bus(mut self, events: SharedEventBus) -> Self {
        self.events = events;
        self
    }

    /// `userId` attached to drafts that do not carry one
    pub fn with_default_user_id(mut self, user_id: Option<i64>) -> Self {
        self.default_user_id = user_id;
        self
    }

    pub fn subscribe(&self) -> EventSubscriber {
        self.events.subscribe()
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Fetch the whole collection and replace the local one.
    ///
    /// On failure the previous collection is kept. A store that was never
    /// loaded moves to `LoadFailed`; a loaded one stays `Loaded`.
    pub async fn load(&mut self) -> StoreResult<usize> {
        let fetched = match self.remote.fetch_all().await {
            Ok(posts) => posts,
            Err(e) => {
                error!(error = %e, "Failed to load posts");
                if self.state != StoreState::Loaded {
                    self.state = StoreState::LoadFailed(e.to_string());
                }
                self.publish_error("load", None, &e);
                return Err(StoreError::RemoteFetch(e));
            }
        };

        let received = fetched.len();
        let mut posts: Vec<Post> = Vec::with_capacity(received);
        for post in fetched {
            if posts.iter().any(|p| p.id == post.id) {
                warn!(post_id = post.id, "Duplicate id in fetched posts, keeping the first");
                continue;
            }
            posts.push(post);
        }

        self.posts = posts;
        self.state = StoreState::Loaded;

        info!(count = self.posts.len(), received, "Posts loaded");
        self.events.publish(Event::PostsLoaded(PostsLoadedEvent {
            count: self.posts.len(),
            timestamp: Utc::now(),
        }));
        self.set_current_page(1);

        Ok(self.posts.len())
    }

    /// Create a post remotely and append the server's copy.
    ///
    /// Ids stay unique: if the server hands back an id that is already listed
    /// (JSONPlaceholder answers every create with 101), that entry is
    /// overwritten and the length does not grow. The outcome tells the two
    /// cases apart.
    ///
    /// The draft is sent as-is; use [`PostStore::validate_draft`] first if the
    /// caller wants the presence check.
    pub async fn create(&mut self, mut draft: PostDraft) -> StoreResult<CreateOutcome> {
        if draft.user_id.is_none() {
            draft.user_id = self.default_user_id;
        }

        let post = match self.remote.create(&draft).await {
            Ok(post) => post,
            Err(e) => {
                error!(error = %e, "Failed to create post");
                self.publish_error("create", None, &e);
                return Err(StoreError::write(WriteOp::Create, None, e));
            }
        };

        let outcome = match self.position(post.id) {
            Some(index) => {
                warn!(post_id = post.id, index, "Created post reuses an existing id, replacing it");
                self.posts[index] = post.clone();
                CreateOutcome::Replaced { index, post }
            }
            None => {
                self.posts.push(post.clone());
                CreateOutcome::Appended(post)
            }
        };

        let post_id = outcome.post().id;
        info!(post_id, total = self.posts.len(), "Post created");
        self.events.publish(Event::PostCreated(PostCreatedEvent {
            post_id,
            replaced_existing: matches!(outcome, CreateOutcome::Replaced { .. }),
            timestamp: Utc::now(),
        }));

        Ok(outcome)
    }

    /// Send the full post remotely, then replace the local entry in place.
    pub async fn update(&mut self, post: Post) -> StoreResult<UpdateOutcome> {
        let id = post.id;
        if let Err(e) = self.remote.update(&post).await {
            error!(post_id = id, error = %e, "Failed to update post");
            self.publish_error("update", Some(id), &e);
            return Err(StoreError::write(WriteOp::Update, Some(id), e));
        }

        let outcome = match self.position(id) {
            Some(index) => {
                self.posts[index] = post;
                info!(post_id = id, index, "Post updated");
                UpdateOutcome::Replaced { index }
            }
            None => {
                warn!(post_id = id, "Post updated remotely but not present locally");
                UpdateOutcome::MissingLocally
            }
        };

        self.events.publish(Event::PostUpdated(PostUpdatedEvent {
            post_id: id,
            applied_locally: matches!(outcome, UpdateOutcome::Replaced { .. }),
            timestamp: Utc::now(),
        }));

        Ok(outcome)
    }

    /// Delete remotely, then drop the local entry if there is one.
    ///
    /// Returns whether a local entry was removed.
    pub async fn remove(&mut self, id: PostId) -> StoreResult<bool> {
        if let Err(e) = self.remote.delete(id).await {
            error!(post_id = id, error = %e, "Failed to delete post");
            self.publish_error("delete", Some(id), &e);
            return Err(StoreError::write(WriteOp::Delete, Some(id), e));
        }

        let removed = match self.position(id) {
            Some(index) => {
                self.posts.remove(index);
                true
            }
            None => false,
        };

        info!(post_id = id, removed, total = self.posts.len(), "Post deleted");
        self.events.publish(Event::PostRemoved(PostRemovedEvent {
            post_id: id,
            removed_locally: removed,
            timestamp: Utc::now(),
        }));

        // Deleting the only post on the last page moves the view back
        self.set_current_page(self.current_page);

        Ok(removed)
    }

    /// Visible slice for `page` at `page_size`. Out-of-range pages are clamped.
    pub fn paginate(&self, page: usize, page_size: usize) -> StoreResult<PageView<'_, Post>> {
        if page_size == 0 {
            return Err(StoreError::InvalidPageSize);
        }
        Ok(PageView::new(&self.posts, PaginationParams::new(page, page_size)))
    }

    /// The page the presentation layer is currently showing
    pub fn current_view(&self) -> PageView<'_, Post> {
        PageView::new(&self.posts, self.params(self.current_page))
    }

    pub fn total_pages(&self) -> usize {
        self.params(self.current_page).total_pages(self.posts.len())
    }

    /// Move to `page`, clamped. Returns the page actually selected.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let clamped = self.params(page).clamp(self.posts.len()).page;
        if clamped != page {
            debug!(requested = page, clamped, "Page out of range");
        }
        self.set_current_page(clamped)
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    /// Page on which the post with `id` is shown
    pub fn page_of(&self, id: PostId) -> Option<usize> {
        self.position(id).map(|index| index / self.page_size + 1)
    }

    /// Presence check for both draft fields
    pub fn validate_draft(draft: &PostDraft) -> StoreResult<()> {
        draft.validate()?;
        Ok(())
    }

    /// Clamp `page` to the collection and publish `PageChanged` if it moved.
    fn set_current_page(&mut self, page: usize) -> usize {
        let clamped = self.params(page).clamp(self.posts.len()).page;
        if clamped != self.current_page {
            debug!(from = self.current_page, to = clamped, "Current page changed");
            self.current_page = clamped;
            self.events.publish(Event::PageChanged(PageChangedEvent {
                page: clamped,
                total_pages: self.total_pages(),
                timestamp: Utc::now(),
            }));
        }
        clamped
    }

    fn position(&self, id: PostId) -> Option<usize> {
        self.posts.iter().position(|p| p.id == id)
    }

    fn params(&self, page: usize) -> PaginationParams {
        PaginationParams::new(page, self.page_size)
    }

    fn publish_error(&self, operation: &str, post_id: Option<PostId>, err: &RemoteError) {
        self.events.publish(Event::Error(ErrorEvent {
            operation: operation.to_string(),
            post_id,
            message: err.to_string(),
            timestamp: Utc::now(),
        }));
    }
}
