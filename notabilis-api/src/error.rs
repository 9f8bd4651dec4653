//! API error taxonomy.
//!
//! Callers decide retry vs. abort from the error kind: transport failures
//! and server-side statuses are transient, everything else is not.

use thiserror::Error;

/// Error type for observation-API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid base URL or client configuration. Fatal, never retried.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network-level failure reaching the API.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// The response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A caller-side contract violation (e.g. a page size of zero).
    #[error("Precondition violated: {0}")]
    Precondition(String),
}

impl ApiError {
    /// Returns true for failures a retry policy may reasonably retry:
    /// network-level errors, rate limiting, and server-side statuses.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Config(_) | Self::Decode(_) | Self::Precondition(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_and_server_errors_are_transient() {
        assert!(ApiError::Transport("connection reset".into()).is_transient());
        assert!(ApiError::Status {
            status: 429,
            url: "https://api.test/x".into()
        }
        .is_transient());
        assert!(ApiError::Status {
            status: 503,
            url: "https://api.test/x".into()
        }
        .is_transient());
    }

    #[test]
    fn test_client_side_errors_are_not_transient() {
        assert!(!ApiError::Config("bad base".into()).is_transient());
        assert!(!ApiError::Precondition("per_page of zero".into()).is_transient());
        assert!(!ApiError::Status {
            status: 404,
            url: "https://api.test/x".into()
        }
        .is_transient());
    }
}
