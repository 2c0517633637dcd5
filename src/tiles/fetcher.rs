//! The "fetch tile bytes for a URL" seam.

use async_trait::async_trait;
use std::time::Duration;

use super::error::TileFetchError;
use super::loader::TileLoaderConfig;
use crate::Result;

/// Anything that can turn a tile URL into image bytes or a classified failure.
///
/// Implementations must not retry; a failed tile stays failed until the map
/// asks for it again.
#[async_trait]
pub trait TileFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, TileFetchError>;
}

/// Async HTTP fetcher backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTileFetcher {
    client: reqwest::Client,
}

impl HttpTileFetcher {
    /// Build a client with the loader's timeout and user agent.
    pub fn new(config: &TileLoaderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client (shared connection pool, custom TLS, ...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TileFetcher for HttpTileFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, TileFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TileFetchError::network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TileFetchError::from_status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TileFetchError::network(e.without_url().to_string()))?;
        Ok(bytes.to_vec())
    }
}
