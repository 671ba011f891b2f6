//! Post aggregate
//!
//! Contains the Post entity, the creation draft and the remote resource port.

pub mod model;
pub mod repository;

pub use model::{Post, PostDraft, PostId};
pub use repository::RemoteResource;
