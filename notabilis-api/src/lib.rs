// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Notabilis API
//!
//! Rate-limited access layer for the iNaturalist observation API.
//!
//! This crate shapes requests, serializes them through a single-slot
//! rate gate, and decodes typed responses:
//!
//! - [`endpoint`] - Typed endpoint definitions and parameter structs
//! - [`request`] - URL construction against a validated base address
//! - [`transport`] - The network seam ([`Transport`]) and its reqwest
//!   implementation
//! - [`limit`] - The rate gate: one request in flight, minimum spacing
//! - [`retry`] - Opt-in retry with exponential backoff (default: none)
//! - [`client`] - [`ApiClient`], tying the above together
//! - [`page`] - Lazy [`paged`] streams over the listing endpoints
//!
//! ## Example
//!
//! ```ignore
//! use notabilis_api::endpoint::{SpeciesCounts, SpeciesCountsParams};
//! use notabilis_api::ApiClient;
//!
//! let client = ApiClient::new()?;
//! let params = SpeciesCountsParams {
//!     place_id: 674,
//!     per_page: Some(500),
//!     ..SpeciesCountsParams::default()
//! };
//! let counts = client.call::<SpeciesCounts>(&params).await?;
//! ```

pub mod client;
pub mod endpoint;
pub mod error;
pub mod limit;
pub mod page;
pub mod request;
pub mod retry;
pub mod transport;

// Re-export key types at crate root
pub use client::ApiClient;
pub use endpoint::{Endpoint, Paged, PagedParams, QueryParams};
pub use error::ApiError;
pub use limit::{RateGate, RatePermit, DEFAULT_MIN_INTERVAL};
pub use page::paged;
pub use request::{RequestBuilder, DEFAULT_BASE_URL};
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, RawResponse, Transport, CACHE_TTL_HEADER};
