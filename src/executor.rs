//! Query execution against the subgraph endpoint.
//!
//! The client is built over a single abstract capability: execute a GraphQL
//! query, get the response's `data` value back. [`SubgraphExecutor`] is the
//! production implementation; tests substitute a fixture source through the
//! same [`QueryExecutor`] trait.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DataError, DataResult};

/// GraphQL request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct GraphRequest<'a> {
    /// Query document
    pub query: &'a str,
    /// Query variables
    pub variables: Value,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphError>,
}

/// Application-level error reported by the endpoint.
#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

/// The query-execution capability the client is built over.
///
/// Implementations return the response's `data` value with the GraphQL
/// envelope already unwrapped, and classify their own transport failures
/// into [`DataError`] kinds. They must not retry: the failure contract stays
/// deterministic and retry policy belongs to the caller.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute `query` with `variables` and return the response's `data`.
    async fn execute(&self, query: &str, variables: Value) -> DataResult<Value>;
}

/// [`QueryExecutor`] backed by an HTTP POST to a subgraph endpoint.
#[derive(Debug, Clone)]
pub struct SubgraphExecutor {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl SubgraphExecutor {
    /// Create an executor over a prepared HTTP client.
    ///
    /// `timeout` must match the client's configured timeout; it is only used
    /// to annotate [`DataError::Timeout`] values. Most callers should go
    /// through [`OstiumDataClientBuilder`](crate::client::OstiumDataClientBuilder)
    /// instead.
    pub fn new(http: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            url: url.into(),
            timeout,
        }
    }

    /// Classify a transport failure.
    ///
    /// Timeouts win over everything; connect-phase failures (DNS, refused,
    /// reset during connect) are `Unreachable`; anything after a connection
    /// was established is the endpoint's fault.
    fn classify(&self, err: reqwest::Error) -> DataError {
        if err.is_timeout() {
            DataError::Timeout(self.timeout)
        } else if err.is_connect() {
            DataError::Unreachable(err.to_string())
        } else {
            DataError::Endpoint(err.to_string())
        }
    }
}

#[async_trait]
impl QueryExecutor for SubgraphExecutor {
    async fn execute(&self, query: &str, variables: Value) -> DataResult<Value> {
        let body = GraphRequest { query, variables };
        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                if status.is_success() {
                    return Err(self.classify(e));
                }
                tracing::warn!(status = %status, "failed to read error response body: {e}");
                String::new()
            }
        };

        if !status.is_success() {
            let detail = if text.is_empty() {
                status.to_string()
            } else {
                text
            };
            return Err(DataError::Endpoint(format!(
                "HTTP {}: {}",
                status.as_u16(),
                detail
            )));
        }

        decode_envelope(&text)
    }
}

/// Unwrap a GraphQL response body into its `data` value.
///
/// Non-empty `errors` surface as `Endpoint` carrying the joined remote
/// messages; a body with neither `data` nor `errors` is malformed.
fn decode_envelope(body: &str) -> DataResult<Value> {
    let envelope: GraphResponse = serde_json::from_str(body)
        .map_err(|e| DataError::Endpoint(format!("malformed response body: {e}")))?;

    if !envelope.errors.is_empty() {
        let detail = envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(DataError::Endpoint(detail));
    }

    envelope
        .data
        .ok_or_else(|| DataError::Endpoint("response carried neither data nor errors".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_envelope_data() {
        let data = decode_envelope(r#"{"data": {"pairs": []}}"#).unwrap();
        assert_eq!(data, json!({"pairs": []}));
    }

    #[test]
    fn test_decode_envelope_joins_remote_errors() {
        let body = r#"{"errors": [{"message": "field `trader` not defined"}, {"message": "bad cursor"}]}"#;
        assert_eq!(
            decode_envelope(body),
            Err(DataError::Endpoint(
                "field `trader` not defined; bad cursor".to_string()
            ))
        );
    }

    #[test]
    fn test_decode_envelope_rejects_empty_envelope() {
        assert!(matches!(
            decode_envelope(r#"{}"#),
            Err(DataError::Endpoint(_))
        ));
    }

    #[test]
    fn test_decode_envelope_rejects_non_json() {
        assert!(matches!(
            decode_envelope("<html>502 Bad Gateway</html>"),
            Err(DataError::Endpoint(_))
        ));
    }

    #[test]
    fn test_graph_request_serialize() {
        let request = GraphRequest {
            query: "query Pairs { pairs { id } }",
            variables: json!({"trader": "0xabc"}),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["query"], "query Pairs { pairs { id } }");
        assert_eq!(body["variables"]["trader"], "0xabc");
    }
}
