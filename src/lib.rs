//! # Ostium Market-Data SDK
//!
//! A read-only Rust client for the Ostium trading subgraph.
//!
//! The client covers four retrievals: registered trading pairs, a wallet's
//! open leveraged positions, its pending limit orders, and its recent order
//! history. Raw subgraph records (scaled-integer strings, zero-means-unset
//! optionals) are normalized into exact [`rust_decimal::Decimal`] values and
//! true `Option`s; failures classify into a closed taxonomy so callers can
//! tell bad input, unreachable endpoint, timeout, and remote errors apart.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ostium_data::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OstiumDataClient::new(DEFAULT_SUBGRAPH_URL)?;
//!
//!     let pairs = client.list_pairs().await?;
//!     println!("Found {} trading pairs", pairs.len());
//!
//!     let wallet = "0x0514f2f3e0277c47117e3f33d9390efb0acfbdfe";
//!     let open = client.open_trades(wallet).await?;
//!     let orders = client.limit_orders(wallet).await?;
//!     let history = client.recent_history(wallet, 5).await?;
//!     println!("{} open, {} pending, {} recent", open.len(), orders.len(), history.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`error::DataResult`]. An empty `Vec` always
//! means "zero matching records" — a failed request never collapses into an
//! empty result:
//!
//! ```rust,ignore
//! use ostium_data::prelude::*;
//!
//! match client.list_pairs().await {
//!     Ok(pairs) => println!("{} pairs", pairs.len()),
//!     Err(DataError::Unreachable(detail)) => eprintln!("check connectivity/DNS: {detail}"),
//!     Err(DataError::Timeout(after)) => eprintln!("timed out after {after:?}, retry may succeed"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Testing against fixtures
//!
//! The query endpoint is reached through the [`executor::QueryExecutor`]
//! trait; substitute it with [`client::OstiumDataClientBuilder::executor`]
//! to run the client against canned responses.

/// Subgraph client and builder.
pub mod client;

/// Error taxonomy for subgraph operations.
pub mod error;

/// Query-execution capability and its HTTP implementation.
pub mod executor;

/// Network URL constants.
pub mod network;

/// Fixed-point decoding of subgraph numeric fields.
pub mod scale;

/// Typed entities returned by the subgraph.
pub mod types;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use ostium_data::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{OstiumDataClient, OstiumDataClientBuilder};
    pub use crate::error::{DataError, DataResult};
    pub use crate::executor::{GraphRequest, QueryExecutor, SubgraphExecutor};
    pub use crate::network::DEFAULT_SUBGRAPH_URL;
    pub use crate::scale::{
        decode_scaled, decode_scaled_opt, ScaleError, COLLATERAL_DECIMALS, LEVERAGE_DECIMALS,
        PERCENT_DECIMALS, PRICE_DECIMALS,
    };
    pub use crate::types::{
        HistoryEntry, LimitOrder, OpenTrade, OrderAction, OrderType, Side, TradingPair,
    };
}
