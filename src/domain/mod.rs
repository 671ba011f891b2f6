//! Domain layer: entities and the ports the application depends on.

pub mod post;

pub use post::{Post, PostDraft, PostId, RemoteResource};

pub use crate::shared::types::errors::{RemoteError, RemoteResult};
