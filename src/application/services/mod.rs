//! Application services

mod post_store;

pub use post_store::{CreateOutcome, PostStore, StoreState, UpdateOutcome};
