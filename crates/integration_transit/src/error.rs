//! Failure modes of the transit provider
//!
//! Only this crate constructs these; the infrastructure adapters collapse
//! them into application-level errors before they reach the pipeline.

use thiserror::Error;

/// Errors surfaced by the Transit App API client
#[derive(Debug, Error)]
pub enum TransitError {
    /// The provider could not be reached at all
    #[error("transit provider unreachable: {0}")]
    Unreachable(String),

    /// The provider answered with a non-success HTTP status
    #[error("transit provider returned HTTP {status}")]
    BadStatus {
        /// The HTTP status code
        status: u16,
    },

    /// The response body did not match the documented payload shape
    #[error("malformed transit payload: {0}")]
    BadPayload(String),

    /// The provider throttled the API key
    #[error("transit provider throttled the request (retry after {retry_after_secs:?}s)")]
    Throttled {
        /// Seconds to wait before retrying, when the provider names one
        retry_after_secs: Option<u64>,
    },

    /// Client-side configuration was rejected
    #[error("invalid transit configuration: {0}")]
    InvalidConfig(String),

    /// The bounded wait elapsed before the provider answered
    #[error("transit request exceeded {timeout_secs}s")]
    Timeout {
        /// The configured timeout in seconds
        timeout_secs: u64,
    },
}

impl TransitError {
    /// Whether a fresh attempt could plausibly succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::BadPayload(_) | Self::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_failures_are_retryable() {
        assert!(TransitError::Unreachable("dns".to_string()).is_retryable());
        assert!(TransitError::BadStatus { status: 503 }.is_retryable());
        assert!(TransitError::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(
            TransitError::Throttled {
                retry_after_secs: None
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_permanent_failures_are_not_retryable() {
        assert!(!TransitError::BadPayload("truncated".to_string()).is_retryable());
        assert!(!TransitError::InvalidConfig("no key".to_string()).is_retryable());
    }

    #[test]
    fn test_display_names_the_detail() {
        assert!(
            TransitError::BadStatus { status: 502 }
                .to_string()
                .contains("502")
        );
        assert!(
            TransitError::Timeout { timeout_secs: 10 }
                .to_string()
                .contains("10")
        );
        assert!(
            TransitError::InvalidConfig("transit API key is missing".to_string())
                .to_string()
                .contains("API key")
        );
    }
}
