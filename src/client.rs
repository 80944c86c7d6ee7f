//! Subgraph client for Ostium market data.
//!
//! [`OstiumDataClient`] provides a type-safe, read-only interface to the
//! Ostium indexing subgraph: registered trading pairs, a wallet's open
//! positions and pending limit orders, and its recent order history.
//!
//! # Example
//!
//! ```rust,ignore
//! use ostium_data::client::OstiumDataClient;
//! use ostium_data::network::DEFAULT_SUBGRAPH_URL;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OstiumDataClient::new(DEFAULT_SUBGRAPH_URL)?;
//!
//!     let pairs = client.list_pairs().await?;
//!     println!("Found {} trading pairs", pairs.len());
//!
//!     let wallet = "0x0514f2f3e0277c47117e3f33d9390efb0acfbdfe";
//!     for trade in client.open_trades(wallet).await? {
//!         println!("{} {}x on pair {}", trade.side(), trade.leverage, trade.pair_id);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use crate::error::{DataError, DataResult};
use crate::executor::{QueryExecutor, SubgraphExecutor};
use crate::types::{
    HistoryEntry, LimitOrder, OpenTrade, RawHistoryEntry, RawLimitOrder, RawTrade, TradingPair,
};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Query documents
// =============================================================================

const PAIRS_QUERY: &str = "\
query Pairs {
  pairs {
    id
    from
    to
  }
}";

const OPEN_TRADES_QUERY: &str = "\
query OpenTrades($trader: String!) {
  trades(where: { trader: $trader, isOpen: true }) {
    tradeID
    pairId
    isBuy
    leverage
    collateral
    openPrice
    notional
    stopLossPrice
    takeProfitPrice
  }
}";

const LIMIT_ORDERS_QUERY: &str = "\
query LimitOrders($trader: String!) {
  limitOrders(where: { trader: $trader, isActive: true }) {
    id
    pairId
    isBuy
    leverage
    collateral
    openPrice
    stopLossPrice
    takeProfitPrice
  }
}";

const RECENT_HISTORY_QUERY: &str = "\
query RecentHistory($trader: String!, $first: Int!) {
  orderHistories(
    where: { trader: $trader }
    orderBy: timestamp
    orderDirection: desc
    first: $first
  ) {
    id
    pairId
    orderAction
    orderType
    price
    collateral
    totalProfitPercent
    timestamp
  }
}";

// =============================================================================
// Builder
// =============================================================================

/// Builder for configuring [`OstiumDataClient`].
#[derive(Clone)]
pub struct OstiumDataClientBuilder {
    endpoint_url: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
    executor: Option<Arc<dyn QueryExecutor>>,
}

impl OstiumDataClientBuilder {
    /// Create a new builder with the given subgraph endpoint URL.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: Vec::new(),
            executor: None,
        }
    }

    /// Set the per-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the per-call timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Add a default header to all requests.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Substitute the query-execution capability.
    ///
    /// Tests use this to run the client against a fixture source instead of
    /// the network; the timeout and header settings only apply to the default
    /// HTTP executor.
    pub fn executor(mut self, executor: Arc<dyn QueryExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Build the client.
    pub fn build(self) -> DataResult<OstiumDataClient> {
        let executor: Arc<dyn QueryExecutor> = match self.executor {
            Some(executor) => executor,
            None => {
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                for (name, value) in &self.default_headers {
                    let header_name = reqwest::header::HeaderName::try_from(name.as_str())
                        .map_err(|e| {
                            DataError::Validation(format!("invalid header name {name:?}: {e}"))
                        })?;
                    let header_value = reqwest::header::HeaderValue::from_str(value)
                        .map_err(|e| {
                            DataError::Validation(format!("invalid header value for {name:?}: {e}"))
                        })?;
                    headers.insert(header_name, header_value);
                }

                let http = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .default_headers(headers)
                    .build()
                    .map_err(|e| {
                        DataError::Validation(format!("failed to initialize HTTP client: {e}"))
                    })?;

                Arc::new(SubgraphExecutor::new(
                    http,
                    self.endpoint_url.clone(),
                    self.timeout,
                ))
            }
        };

        Ok(OstiumDataClient {
            executor,
            endpoint_url: self.endpoint_url,
        })
    }
}

// =============================================================================
// Client
// =============================================================================

/// Read-only client for the Ostium trading subgraph.
///
/// The client is a stateless façade: each operation validates its input,
/// issues one query through the executor, and maps the raw records into
/// typed entities. Operations fail independently and may run concurrently;
/// the client holds no session state and performs no caching and no retries.
#[derive(Clone)]
pub struct OstiumDataClient {
    executor: Arc<dyn QueryExecutor>,
    endpoint_url: String,
}

impl std::fmt::Debug for OstiumDataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OstiumDataClient")
            .field("endpoint_url", &self.endpoint_url)
            .finish_non_exhaustive()
    }
}

impl OstiumDataClient {
    /// Create a new client with default settings (30 s timeout).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(endpoint_url: impl Into<String>) -> DataResult<Self> {
        OstiumDataClientBuilder::new(endpoint_url).build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(endpoint_url: impl Into<String>) -> OstiumDataClientBuilder {
        OstiumDataClientBuilder::new(endpoint_url)
    }

    /// Get the configured endpoint URL.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    // =========================================================================
    // Validation helpers
    // =========================================================================

    /// Validate that a string is a well-formed EVM wallet address.
    fn validate_wallet(wallet: &str) -> DataResult<()> {
        let hex = wallet.strip_prefix("0x").ok_or_else(|| {
            DataError::Validation(format!("wallet address must start with 0x: {wallet:?}"))
        })?;
        if hex.len() != 40 {
            return Err(DataError::Validation(format!(
                "wallet address must be 42 characters, got {}",
                wallet.len()
            )));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DataError::Validation(format!(
                "wallet address contains non-hex characters: {wallet:?}"
            )));
        }
        Ok(())
    }

    /// Validate that a history limit is positive.
    fn validate_limit(limit: u32) -> DataResult<()> {
        if limit == 0 {
            return Err(DataError::Validation(
                "history limit must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Extract and deserialize one field of the response's `data` value.
    fn field<T: serde::de::DeserializeOwned>(mut data: Value, name: &str) -> DataResult<T> {
        let value = data
            .get_mut(name)
            .map(Value::take)
            .ok_or_else(|| DataError::Endpoint(format!("response data is missing {name:?}")))?;
        serde_json::from_value(value)
            .map_err(|e| DataError::Endpoint(format!("malformed {name} payload: {e}")))
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Get the full set of registered trading pairs.
    ///
    /// Result order is not meaningful.
    pub async fn list_pairs(&self) -> DataResult<Vec<TradingPair>> {
        tracing::debug!("fetching trading pairs");
        let data = self.executor.execute(PAIRS_QUERY, json!({})).await?;
        Self::field(data, "pairs")
    }

    /// Get a wallet's currently open positions.
    ///
    /// Returns an empty vec (not an error) when the wallet has none.
    pub async fn open_trades(&self, wallet: &str) -> DataResult<Vec<OpenTrade>> {
        Self::validate_wallet(wallet)?;
        tracing::debug!(wallet, "fetching open trades");
        let variables = json!({ "trader": wallet.to_ascii_lowercase() });
        let data = self.executor.execute(OPEN_TRADES_QUERY, variables).await?;
        let raw: Vec<RawTrade> = Self::field(data, "trades")?;
        raw.into_iter().map(OpenTrade::try_from).collect()
    }

    /// Get a wallet's pending limit orders.
    ///
    /// Scoped to pending orders only; filled and cancelled orders never
    /// appear. Returns an empty vec when the wallet has none.
    pub async fn limit_orders(&self, wallet: &str) -> DataResult<Vec<LimitOrder>> {
        Self::validate_wallet(wallet)?;
        tracing::debug!(wallet, "fetching limit orders");
        let variables = json!({ "trader": wallet.to_ascii_lowercase() });
        let data = self.executor.execute(LIMIT_ORDERS_QUERY, variables).await?;
        let raw: Vec<RawLimitOrder> = Self::field(data, "limitOrders")?;
        raw.into_iter().map(LimitOrder::try_from).collect()
    }

    /// Get a wallet's most recent order history, newest first.
    ///
    /// At most `limit` entries come back; `limit` must be positive.
    pub async fn recent_history(
        &self,
        wallet: &str,
        limit: u32,
    ) -> DataResult<Vec<HistoryEntry>> {
        Self::validate_wallet(wallet)?;
        Self::validate_limit(limit)?;
        tracing::debug!(wallet, limit, "fetching recent history");
        let variables = json!({ "trader": wallet.to_ascii_lowercase(), "first": limit });
        let data = self
            .executor
            .execute(RECENT_HISTORY_QUERY, variables)
            .await?;
        let raw: Vec<RawHistoryEntry> = Self::field(data, "orderHistories")?;
        let mut entries = raw
            .into_iter()
            .map(HistoryEntry::try_from)
            .collect::<DataResult<Vec<_>>>()?;
        // Newest first and size-limited regardless of how the endpoint
        // ordered the page.
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET: &str = "0x0514f2f3e0277c47117e3f33d9390efb0acfbdfe";

    #[test]
    fn test_client_creation() {
        let client = OstiumDataClient::new("https://subgraph.ostium.app/mainnet/api").unwrap();
        assert_eq!(
            client.endpoint_url(),
            "https://subgraph.ostium.app/mainnet/api"
        );
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = OstiumDataClient::new("https://subgraph.ostium.app/mainnet/api/").unwrap();
        assert_eq!(
            client.endpoint_url(),
            "https://subgraph.ostium.app/mainnet/api"
        );
    }

    #[test]
    fn test_client_builder() {
        let client = OstiumDataClient::builder("https://subgraph.ostium.app/mainnet/api")
            .timeout_secs(60)
            .header("X-Api-Key", "test-key")
            .build()
            .unwrap();
        assert_eq!(
            client.endpoint_url(),
            "https://subgraph.ostium.app/mainnet/api"
        );
    }

    #[test]
    fn test_builder_rejects_bad_header_name() {
        let result = OstiumDataClient::builder("https://subgraph.ostium.app/mainnet/api")
            .header("bad header\n", "value")
            .build();
        assert!(matches!(result, Err(DataError::Validation(_))));
    }

    #[test]
    fn test_validate_wallet_accepts_checksummed_case() {
        assert!(OstiumDataClient::validate_wallet(WALLET).is_ok());
        assert!(OstiumDataClient::validate_wallet(
            "0x0514F2F3E0277c47117E3F33D9390efb0ACFbdfE"
        )
        .is_ok());
    }

    #[test]
    fn test_validate_wallet_rejects_malformed() {
        // Missing prefix
        assert!(matches!(
            OstiumDataClient::validate_wallet("0514f2f3e0277c47117e3f33d9390efb0acfbdfe"),
            Err(DataError::Validation(_))
        ));
        // Wrong length
        assert!(matches!(
            OstiumDataClient::validate_wallet("0x0514f2f3"),
            Err(DataError::Validation(_))
        ));
        // Bad charset
        assert!(matches!(
            OstiumDataClient::validate_wallet("0x0514f2f3e0277c47117e3f33d9390efb0acfbdzz"),
            Err(DataError::Validation(_))
        ));
        // Empty
        assert!(matches!(
            OstiumDataClient::validate_wallet(""),
            Err(DataError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_limit() {
        assert!(OstiumDataClient::validate_limit(1).is_ok());
        assert!(OstiumDataClient::validate_limit(500).is_ok());
        assert!(matches!(
            OstiumDataClient::validate_limit(0),
            Err(DataError::Validation(_))
        ));
    }

    #[test]
    fn test_field_extraction() {
        let data = json!({ "pairs": [{ "id": "0", "from": "BTC", "to": "USD" }] });
        let pairs: Vec<TradingPair> = OstiumDataClient::field(data, "pairs").unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].symbol(), "BTC/USD");
    }

    #[test]
    fn test_field_missing_is_endpoint_error() {
        let data = json!({ "somethingElse": [] });
        let result: DataResult<Vec<TradingPair>> = OstiumDataClient::field(data, "pairs");
        assert!(matches!(result, Err(DataError::Endpoint(_))));
    }
}
