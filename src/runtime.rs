//! Session bootstrap shared by the binary and embedders.
//!
//! Builds the remote collaborator from configuration and hands back an
//! empty [`PostStore`] ready for `load()`.

use std::sync::Arc;

use tracing::info;

use crate::application::PostStore;
use crate::config::AppConfig;
use crate::domain::RemoteResource;
use crate::infrastructure::{HttpRemote, InMemoryRemote};
use crate::notifications::SharedEventBus;

/// Posts generated for offline sessions
const OFFLINE_SAMPLE_SIZE: usize = 100;

/// Options for opening a session.
pub struct SessionOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Use generated in-memory data instead of the HTTP endpoint.
    pub offline: bool,
    /// Publish store events on this bus instead of a private one.
    pub event_bus: Option<SharedEventBus>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            offline: false,
            event_bus: None,
        }
    }
}

/// Create the remote resource selected by `opts`.
pub fn build_remote(opts: &SessionOptions) -> Result<Arc<dyn RemoteResource>, Box<dyn std::error::Error>> {
    if opts.offline {
        info!(posts = OFFLINE_SAMPLE_SIZE, "Using in-memory posts");
        return Ok(Arc::new(InMemoryRemote::sample(OFFLINE_SAMPLE_SIZE)));
    }

    let remote = HttpRemote::from_config(&opts.config.remote)?;
    info!(base_url = remote.base_url(), "Using remote posts resource");
    Ok(Arc::new(remote))
}

/// Open an unloaded store for a new session.
pub fn open_session(opts: SessionOptions) -> Result<PostStore, Box<dyn std::error::Error>> {
    let remote = build_remote(&opts)?;
    let store = PostStore::new(remote, opts.config.page_size())?
        .with_default_user_id(opts.config.remote.user_id);

    Ok(match opts.event_bus {
        Some(bus) => store.with_event_bus(bus),
        None => store,
    })
}

/// Initialize tracing from the logging section. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr so rendered tables on stdout stay clean.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::StoreState;
    use crate::notifications::create_event_bus;

    #[tokio::test]
    async fn offline_session_loads_sample_posts() {
        let mut store = open_session(SessionOptions {
            offline: true,
            ..SessionOptions::default()
        })
        .unwrap();

        assert_eq!(store.state(), &StoreState::Unloaded);
        assert_eq!(store.load().await.unwrap(), OFFLINE_SAMPLE_SIZE);
        assert_eq!(store.total_pages(), 10);
    }

    #[tokio::test]
    async fn session_publishes_on_given_bus() {
        let bus = create_event_bus();
        let mut events = bus.subscribe();
        let mut store = open_session(SessionOptions {
            offline: true,
            event_bus: Some(bus.clone()),
            ..SessionOptions::default()
        })
        .unwrap();

        store.load().await.unwrap();

        let message = events.recv().await.unwrap();
        assert_eq!(message.event.event_type(), "posts_loaded");
    }

    #[test]
    fn page_size_comes_from_config() {
        let mut config = AppConfig::default();
        config.pagination.page_size = 5;

        let store = open_session(SessionOptions {
            config,
            offline: true,
            event_bus: None,
        })
        .unwrap();

        assert_eq!(store.page_size(), 5);
    }
}
