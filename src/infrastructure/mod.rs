//! Infrastructure layer - external concerns

pub mod remote;

pub use remote::{HttpRemote, InMemoryRemote, RemoteOp};
