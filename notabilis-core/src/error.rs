//! Core error types for Notabilis.

use thiserror::Error;

/// Core error type for Notabilis operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid data from an API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A value outside its expected domain (e.g. an unknown quality grade).
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
