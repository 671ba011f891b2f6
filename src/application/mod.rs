pub mod services;

pub use services::{CreateOutcome, PostStore, StoreState, UpdateOutcome};
