//! Remote resource implementations

mod http;
mod memory;

pub use http::HttpRemote;
pub use memory::{InMemoryRemote, RemoteOp};
