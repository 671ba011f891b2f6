//! Notifications module
//!
//! Broadcasts post store changes and failures to whoever renders the store.
//!
//! # Usage
//! ```ignore
//! use posts_crud::notifications::create_event_bus;
//!
//! let event_bus = create_event_bus();
//! let mut events = event_bus.subscribe();
//!
//! // hand `event_bus` to a PostStore, then:
//! while let Some(message) = events.recv().await {
//!     println!("{}", message.event.event_type());
//! }
//! ```

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
