//! Order-history types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::scale::{decode_scaled, COLLATERAL_DECIMALS, PERCENT_DECIMALS, PRICE_DECIMALS};

/// What happened to the position in this history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderAction {
    /// Position opened
    Open,
    /// Position closed by the trader
    Close,
    /// Position force-closed by the liquidation engine
    Liquidate,
    /// Position closed by its take-profit trigger
    TakeProfit,
    /// Position closed by its stop-loss trigger
    StopLoss,
}

/// How the order that produced this entry was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Executed immediately at market
    Market,
    /// Executed when the target price was reached
    Limit,
    /// Executed by a stop trigger
    Stop,
}

/// History record as the subgraph returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHistoryEntry {
    /// Entry identifier
    pub id: String,
    /// Pair identifier
    pub pair_id: String,
    /// Action recorded by this entry
    pub order_action: OrderAction,
    /// Execution type of the order
    pub order_type: OrderType,
    /// Execution price, 18 decimals
    pub price: String,
    /// Collateral in USDC, 6 decimals
    pub collateral: String,
    /// Realized profit percent, 6 decimals; null for entries with no P&L
    #[serde(default)]
    pub total_profit_percent: Option<String>,
    /// Execution time, unix seconds
    pub timestamp: String,
}

/// An immutable record of a past order action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Entry identifier
    pub id: String,
    /// Pair the order was on (unresolved id)
    pub pair_id: String,
    /// Action recorded by this entry
    pub order_action: OrderAction,
    /// Execution type of the order
    pub order_type: OrderType,
    /// Execution price
    pub price: Decimal,
    /// Collateral in USDC
    pub collateral: Decimal,
    /// Realized profit percent, `None` for entries with no P&L attached.
    /// A breakeven close is `Some(0)`, not `None`.
    pub total_profit_percent: Option<Decimal>,
    /// Execution time
    pub timestamp: DateTime<Utc>,
}

impl TryFrom<RawHistoryEntry> for HistoryEntry {
    type Error = DataError;

    fn try_from(raw: RawHistoryEntry) -> Result<Self, Self::Error> {
        let seconds: i64 = raw.timestamp.parse().map_err(|_| {
            DataError::Endpoint(format!("malformed timestamp: {:?}", raw.timestamp))
        })?;
        let timestamp = DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
            DataError::Endpoint(format!("timestamp out of range: {:?}", raw.timestamp))
        })?;
        Ok(Self {
            id: raw.id,
            pair_id: raw.pair_id,
            order_action: raw.order_action,
            order_type: raw.order_type,
            price: decode_scaled(&raw.price, PRICE_DECIMALS)?,
            collateral: decode_scaled(&raw.collateral, COLLATERAL_DECIMALS)?,
            total_profit_percent: raw
                .total_profit_percent
                .as_deref()
                .map(|raw| decode_scaled(raw, PERCENT_DECIMALS))
                .transpose()?,
            timestamp,
        })
    }
}
