//! Network URL constants for the Ostium subgraph client.

/// Default subgraph endpoint for Ostium mainnet (Arbitrum One).
pub const DEFAULT_SUBGRAPH_URL: &str = "https://subgraph.ostium.app/mainnet/api";
