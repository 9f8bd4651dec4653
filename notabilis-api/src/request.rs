//! Request construction against a validated base URL.

use url::Url;

use crate::endpoint::{Endpoint, QueryParams};
use crate::error::ApiError;

/// Default production base URL for the observation API.
pub const DEFAULT_BASE_URL: &str = "https://api.inaturalist.org/v1";

/// Builds concrete request URLs for typed endpoints.
///
/// The base address is validated once at construction; a malformed base is
/// a configuration error, surfaced immediately and never retried.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base: Url,
}

impl RequestBuilder {
    /// Creates a builder over the given base address.
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let url = Url::parse(base)
            .map_err(|e| ApiError::Config(format!("invalid base URL {base:?}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "base URL {base:?} cannot carry a path"
            )));
        }
        Ok(Self { base: url })
    }

    /// Returns the full URL for endpoint `E` with the given parameters.
    pub fn url_for<E: Endpoint>(&self, params: &E::Params) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!(
            "{}{}",
            self.base.path().trim_end_matches('/'),
            E::PATH
        ));
        let pairs = params.query_pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, &value);
            }
        }
        url
    }
}

// ============================================================================
// Tests
// ============================================================================
