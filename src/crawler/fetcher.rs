//! Cache-backed HTTP fetcher
//!
//! This module resolves a URL to its body, preferring the page cache:
//! - Cache hit: return the stored body, no network access
//! - Cache miss: one GET, store the body, return it
//! - No retries; transport errors and non-success statuses are returned

use crate::cache::CacheStore;
use crate::config::{HttpConfig, UserAgentConfig};
use crate::VoteError;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// The user agent is `Name/Version (+ContactURL; ContactEmail)`.
///
/// # Example
///
/// ```no_run
/// use vote_directory::config::{HttpConfig, UserAgentConfig};
/// use vote_directory::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Hit and miss counts for one fetcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Requests answered from the cache
    pub hits: u64,

    /// Requests that went to the network
    pub misses: u64,
}

/// Resolves URLs through a [`CacheStore`], falling back to HTTP GET
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Fetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Builds a fetcher from configuration
    pub fn from_config(user_agent: &UserAgentConfig, http: &HttpConfig) -> Result<Self, VoteError> {
        Ok(Self::new(build_http_client(user_agent, http)?))
    }

    /// Returns the body for `url`, from the cache when present
    ///
    /// On a miss the body is written to `cache` (and flushed to disk) before
    /// it is returned, so repeated calls for the same URL never touch the
    /// network again.
    ///
    /// # Errors
    ///
    /// * `VoteError::Fetch` - transport failure or timeout
    /// * `VoteError::HttpStatus` - non-success status; nothing is cached
    /// * `VoteError::CacheIo` - the cache snapshot could not be written
    pub async fn fetch(&self, url: &str, cache: &mut CacheStore) -> Result<String, VoteError> {
        if let Some(body) = cache.get(url) {
            tracing::debug!("Using cache for {}", url);
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(body.to_string());
        }

        tracing::debug!("Fetching {}", url);
        self.misses.fetch_add(1, Ordering::Relaxed);
        let body = self.get(url).await?;

        cache.put(url, body.as_str())?;
        Ok(body)
    }

    /// Current hit and miss counts
    pub fn stats(&self) -> FetchStats {
        FetchStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    async fn get(&self, url: &str) -> Result<String, VoteError> {
        let fetch_err = |source: reqwest::Error| VoteError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(fetch_err)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("HTTP {} for {}", status.as_u16(), url);
            return Err(VoteError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(fetch_err)
    }
}
