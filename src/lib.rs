//! # posts-crud
//!
//! Paginated create/read/update/delete client for the JSONPlaceholder
//! `posts` resource.
//!
//! ## Architecture
//!
//! - **domain**: the Post entity and the `RemoteResource` port
//! - **application**: `PostStore`, the session's post collection and its pagination
//! - **infrastructure**: HTTP and in-memory `RemoteResource` implementations
//! - **notifications**: event bus the store publishes changes and failures on
//! - **interfaces**: terminal table rendering and the interactive shell
//! - **shared**: errors, pagination arithmetic, validation helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod runtime;
pub mod shared;

pub use application::{CreateOutcome, PostStore, StoreState, UpdateOutcome};
pub use config::{default_config_path, AppConfig};
pub use domain::{Post, PostDraft, PostId, RemoteResource};
pub use infrastructure::{HttpRemote, InMemoryRemote};
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
pub use shared::{PageView, RemoteError, StoreError, StoreResult};
