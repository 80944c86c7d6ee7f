//! Error types for the Ostium subgraph client.

use std::time::Duration;

use thiserror::Error;

use crate::scale::ScaleError;

/// Failure taxonomy for subgraph operations.
///
/// Every operation fails with exactly one of these kinds so callers can pick
/// a recovery path: fix the input, fix connectivity, retry later, or inspect
/// the remote detail. The client itself never retries, and never converts a
/// failure into an empty result — an empty `Vec` always means "zero matching
/// records".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// Malformed caller input, raised before any network call.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Name resolution or connection failure — the endpoint was never reached.
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    /// The request exceeded the configured per-call timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with a non-success status, an application-level
    /// error, or a payload that does not match the subgraph schema. Carries
    /// the remote-provided detail text.
    #[error("endpoint error: {0}")]
    Endpoint(String),
}

/// Result type alias for subgraph operations.
pub type DataResult<T> = Result<T, DataError>;

impl From<ScaleError> for DataError {
    fn from(err: ScaleError) -> Self {
        DataError::Endpoint(format!("malformed numeric field: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DataError::Validation("wallet address must start with 0x".to_string());
        assert_eq!(
            err.to_string(),
            "invalid input: wallet address must start with 0x"
        );

        let err = DataError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "request timed out after 30s");

        let err = DataError::Unreachable("dns error".to_string());
        assert_eq!(err.to_string(), "endpoint unreachable: dns error");
    }

    #[test]
    fn test_scale_error_maps_to_endpoint() {
        let err: DataError = ScaleError::NotAnInteger("abc".to_string()).into();
        assert_eq!(
            err,
            DataError::Endpoint("malformed numeric field: not a scaled integer: \"abc\"".to_string())
        );
    }
}
