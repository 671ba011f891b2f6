//! HTTP client for the JSONPlaceholder-style posts resource

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::RemoteConfig;
use crate::domain::{Post, PostDraft, PostId, RemoteError, RemoteResource, RemoteResult};

/// `RemoteResource` backed by a REST endpoint exposing `/posts`.
pub struct HttpRemote {
    client: Client,
    base_url: String,
}

impl HttpRemote {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build a client with the configured timeout. A zero timeout leaves requests unbounded.
    pub fn from_config(config: &RemoteConfig) -> RemoteResult<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::new(client, config.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    fn post_url(&self, id: PostId) -> String {
        format!("{}/posts/{}", self.base_url, id)
    }
}

#[async_trait]
impl RemoteResource for HttpRemote {
    async fn fetch_all(&self) -> RemoteResult<Vec<Post>> {
        let url = self.posts_url();
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        decode(check(response).await?).await
    }

    async fn create(&self, draft: &PostDraft) -> RemoteResult<Post> {
        let url = self.posts_url();
        debug!(%url, "POST");

        let response = self.client.post(&url).json(draft).send().await?;
        decode(check(response).await?).await
    }

    async fn update(&self, post: &Post) -> RemoteResult<Post> {
        let url = self.post_url(post.id);
        debug!(%url, "PUT");

        let response = self.client.put(&url).json(post).send().await?;
        decode(check(response).await?).await
    }

    async fn delete(&self, id: PostId) -> RemoteResult<()> {
        let url = self.post_url(id);
        debug!(%url, "DELETE");

        let response = self.client.delete(&url).send().await?;
        check(response).await?;
        Ok(())
    }
}

/// Turn non-2xx responses into `RemoteError::Status`.
async fn check(response: Response) -> RemoteResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    Err(RemoteError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
