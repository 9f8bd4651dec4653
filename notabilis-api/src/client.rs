//! Rate-limited API client.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::limit::RateGate;
use crate::request::{RequestBuilder, DEFAULT_BASE_URL};
use crate::retry::RetryPolicy;
use crate::transport::{HttpTransport, Transport};

/// Client for the observation API.
///
/// All calls pass through a single-slot rate gate: at most one request is
/// in flight at a time, with a minimum spacing interval between the
/// completion of one request and the start of the next. Concurrent
/// callers are admitted strictly in arrival order, so requests are never
/// reordered or batched.
pub struct ApiClient {
    request: RequestBuilder,
    transport: Arc<dyn Transport>,
    gate: RateGate,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Creates a client against the production API.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base address.
    pub fn with_base_url(base: &str) -> Result<Self, ApiError> {
        let transport = Arc::new(HttpTransport::new()?);
        Self::with_transport(base, transport)
    }

    /// Creates a client over an arbitrary transport.
    pub fn with_transport(base: &str, transport: Arc<dyn Transport>) -> Result<Self, ApiError> {
        Ok(Self {
            request: RequestBuilder::new(base)?,
            transport,
            gate: RateGate::default(),
            retry: RetryPolicy::default(),
        })
    }

    /// Sets the retry policy for transient failures.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the minimum spacing between requests.
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.gate = RateGate::new(interval);
        self
    }

    /// Calls endpoint `E`, returning its decoded response.
    ///
    /// Non-success statuses surface as [`ApiError::Status`], network
    /// failures as [`ApiError::Transport`], and malformed bodies as
    /// [`ApiError::Decode`]. Transient failures are retried only when a
    /// retry policy was configured.
    pub async fn call<E: Endpoint>(&self, params: &E::Params) -> Result<E::Response, ApiError> {
        let url = self.request.url_for::<E>(params);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.call_once(&url, E::CACHE_TTL_SECS).await {
                Ok(body) => return serde_json::from_str(&body).map_err(ApiError::Decode),
                Err(err) if self.retry.should_retry(&err, attempt) => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    warn!(
                        error = %err,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One gated request: admit, fetch, record completion, check status.
    async fn call_once(&self, url: &Url, cache_ttl_secs: u64) -> Result<String, ApiError> {
        let permit = self.gate.admit().await;
        debug!(url = %url, "API request");
        let result = self.transport.get(url, cache_ttl_secs).await;
        drop(permit);

        let raw = result?;
        if !(200..300).contains(&raw.status) {
            return Err(ApiError::Status {
                status: raw.status,
                url: url.to_string(),
            });
        }
        Ok(raw.body)
    }
}

// ============================================================================
// Tests
// ============================================================================
