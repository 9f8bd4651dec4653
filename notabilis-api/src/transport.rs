//! Transport seam between the client and the network.
//!
//! The production implementation is [`HttpTransport`]; tests substitute
//! canned-response fakes through the [`Transport`] trait.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::error::ApiError;

/// Header carrying the cache-lifetime hint for intermediary caches.
///
/// The hint tells an intermediary how long a response may be reused; the
/// client itself does no caching.
pub const CACHE_TTL_HEADER: &str = "X-CACHE-TTL";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for Notabilis.
const USER_AGENT: &str = concat!("notabilis/", env!("CARGO_PKG_VERSION"));

/// One HTTP exchange as the client sees it.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// A way of performing one GET request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET request carrying the cache-lifetime hint.
    async fn get(&self, url: &Url, cache_ttl_secs: u64) -> Result<RawResponse, ApiError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Creates a transport with the default timeout.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { inner: client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self), fields(url = %url))]
    async fn get(&self, url: &Url, cache_ttl_secs: u64) -> Result<RawResponse, ApiError> {
        debug!("GET request");
        let response = self
            .inner
            .get(url.clone())
            .header(CACHE_TTL_HEADER, cache_ttl_secs)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "Response received");
        Ok(RawResponse { status, body })
    }
}
