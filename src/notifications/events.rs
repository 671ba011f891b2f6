//! Store events
//!
//! Everything a presentation layer may want to react to: collection changes
//! and failed remote calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::PostId;

/// Event types published by the post store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// Collection replaced by a successful load
    PostsLoaded(PostsLoadedEvent),
    /// Post created remotely and added locally
    PostCreated(PostCreatedEvent),
    /// Post updated remotely
    PostUpdated(PostUpdatedEvent),
    /// Post deleted remotely
    PostRemoved(PostRemovedEvent),
    /// Current page changed
    PageChanged(PageChangedEvent),
    /// A remote call failed; the collection was left untouched
    Error(ErrorEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::PostsLoaded(_) => "posts_loaded",
            Event::PostCreated(_) => "post_created",
            Event::PostUpdated(_) => "post_updated",
            Event::PostRemoved(_) => "post_removed",
            Event::PageChanged(_) => "page_changed",
            Event::Error(_) => "error",
        }
    }

    /// Get the post ID if applicable
    pub fn post_id(&self) -> Option<PostId> {
        match self {
            Event::PostCreated(e) => Some(e.post_id),
            Event::PostUpdated(e) => Some(e.post_id),
            Event::PostRemoved(e) => Some(e.post_id),
            Event::Error(e) => e.post_id,
            Event::PostsLoaded(_) | Event::PageChanged(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsLoadedEvent {
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreatedEvent {
    pub post_id: PostId,
    /// True when the server reused a listed id and that entry was overwritten
    pub replaced_existing: bool,
    pub timestamp: DateTime<Utc>,
}

/// Post updated event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostUpdatedEvent {
    pub post_id: PostId,
    /// False when the server accepted the update but no local entry had that id
    pub applied_locally: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRemovedEvent {
    pub post_id: PostId,
    pub removed_locally: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageChangedEvent {
    pub page: usize,
    pub total_pages: usize,
    pub timestamp: DateTime<Utc>,
}

/// Error event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    /// load, create, update or delete
    pub operation: String,
    pub post_id: Option<PostId>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_tag_and_flattened_payload() {
        let message = EventMessage::new(Event::PostRemoved(PostRemovedEvent {
            post_id: 2,
            removed_locally: true,
            timestamp: Utc::now(),
        }));

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "PostRemoved");
        assert_eq!(value["data"]["post_id"], 2);
        assert!(value["id"].as_str().is_some());
    }

    #[test]
    fn post_id_is_exposed_where_relevant() {
        let loaded = Event::PostsLoaded(PostsLoadedEvent {
            count: 3,
            timestamp: Utc::now(),
        });
        assert_eq!(loaded.post_id(), None);
        assert_eq!(loaded.event_type(), "posts_loaded");

        let failed = Event::Error(ErrorEvent {
            operation: "update".into(),
            post_id: Some(9),
            message: "nope".into(),
            timestamp: Utc::now(),
        });
        assert_eq!(failed.post_id(), Some(9));
    }
}
