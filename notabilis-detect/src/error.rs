//! Detector error types.

use notabilis_api::ApiError;
use thiserror::Error;

/// Error type for a rarity scan.
#[derive(Debug, Error)]
pub enum DetectError {
    /// An API call failed. Fatal for the scan unless the client was
    /// configured to retry.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The output sink rejected an emission.
    #[error("Output error: {0}")]
    Output(String),
}
