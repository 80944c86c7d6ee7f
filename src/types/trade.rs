//! Open-position types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::scale::{
    decode_scaled, decode_scaled_opt, COLLATERAL_DECIMALS, LEVERAGE_DECIMALS, PRICE_DECIMALS,
};

/// Direction of a position or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy / long exposure
    Long,
    /// Sell / short exposure
    Short,
}

impl Side {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Open-trade record as the subgraph returns it, numeric fields still in
/// scaled-integer string form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrade {
    /// Trade identifier
    #[serde(rename = "tradeID")]
    pub trade_id: String,
    /// Pair identifier
    pub pair_id: String,
    /// Long (`true`) or short (`false`)
    pub is_buy: bool,
    /// Leverage, 2 decimals
    pub leverage: String,
    /// Collateral in USDC, 6 decimals
    pub collateral: String,
    /// Entry price, 18 decimals
    pub open_price: String,
    /// Position size in USDC, 6 decimals
    pub notional: String,
    /// Stop-loss trigger, 18 decimals; `"0"` or null when unset
    #[serde(default)]
    pub stop_loss_price: Option<String>,
    /// Take-profit trigger, 18 decimals; `"0"` or null when unset
    #[serde(default)]
    pub take_profit_price: Option<String>,
}

/// A currently open leveraged position.
///
/// Snapshot of the remote ledger: the record exists only while the position
/// is open and disappears from subsequent fetches once closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTrade {
    /// Trade identifier
    pub trade_id: String,
    /// Pair this position is on (unresolved id)
    pub pair_id: String,
    /// Long (`true`) or short (`false`)
    pub is_buy: bool,
    /// Position leverage
    pub leverage: Decimal,
    /// Posted collateral in USDC
    pub collateral: Decimal,
    /// Entry price
    pub open_price: Decimal,
    /// Position size in USDC
    pub notional: Decimal,
    /// Stop-loss trigger, `None` when the position has none
    pub stop_loss_price: Option<Decimal>,
    /// Take-profit trigger, `None` when the position has none
    pub take_profit_price: Option<Decimal>,
}

impl OpenTrade {
    /// Direction of the position.
    pub fn side(&self) -> Side {
        if self.is_buy {
            Side::Long
        } else {
            Side::Short
        }
    }
}

impl TryFrom<RawTrade> for OpenTrade {
    type Error = DataError;

    fn try_from(raw: RawTrade) -> Result<Self, Self::Error> {
        Ok(Self {
            trade_id: raw.trade_id,
            pair_id: raw.pair_id,
            is_buy: raw.is_buy,
            leverage: decode_scaled(&raw.leverage, LEVERAGE_DECIMALS)?,
            collateral: decode_scaled(&raw.collateral, COLLATERAL_DECIMALS)?,
            open_price: decode_scaled(&raw.open_price, PRICE_DECIMALS)?,
            notional: decode_scaled(&raw.notional, COLLATERAL_DECIMALS)?,
            stop_loss_price: decode_scaled_opt(raw.stop_loss_price.as_deref(), PRICE_DECIMALS)?,
            take_profit_price: decode_scaled_opt(
                raw.take_profit_price.as_deref(),
                PRICE_DECIMALS,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_trade_maps_to_open_trade() {
        let json = r#"{
            "tradeID": "42",
            "pairId": "0",
            "isBuy": true,
            "leverage": "1000",
            "collateral": "250000000",
            "openPrice": "65000000000000000000000",
            "notional": "2500000000",
            "stopLossPrice": "0",
            "takeProfitPrice": "70000000000000000000000"
        }"#;
        let raw: RawTrade = serde_json::from_str(json).unwrap();
        let trade = OpenTrade::try_from(raw).unwrap();

        assert_eq!(trade.trade_id, "42");
        assert_eq!(trade.side(), Side::Long);
        assert_eq!(trade.leverage, Decimal::from(10));
        assert_eq!(trade.collateral, Decimal::from(250));
        assert_eq!(trade.open_price, Decimal::from(65000));
        assert_eq!(trade.notional, Decimal::from(2500));
        assert_eq!(trade.stop_loss_price, None);
        assert_eq!(trade.take_profit_price, Some(Decimal::from(70000)));
    }

    #[test]
    fn test_absent_triggers_stay_absent() {
        let json = r#"{
            "tradeID": "7",
            "pairId": "3",
            "isBuy": false,
            "leverage": "500",
            "collateral": "100000000",
            "openPrice": "3100000000000000000000",
            "notional": "500000000"
        }"#;
        let raw: RawTrade = serde_json::from_str(json).unwrap();
        let trade = OpenTrade::try_from(raw).unwrap();

        assert_eq!(trade.side(), Side::Short);
        assert_eq!(trade.stop_loss_price, None);
        assert_eq!(trade.take_profit_price, None);
    }

    #[test]
    fn test_malformed_numeric_is_rejected() {
        let json = r#"{
            "tradeID": "7",
            "pairId": "3",
            "isBuy": false,
            "leverage": "10x",
            "collateral": "100000000",
            "openPrice": "3100000000000000000000",
            "notional": "500000000"
        }"#;
        let raw: RawTrade = serde_json::from_str(json).unwrap();
        assert!(matches!(
            OpenTrade::try_from(raw),
            Err(DataError::Endpoint(_))
        ));
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Long.to_string(), "LONG");
        assert_eq!(Side::Short.to_string(), "SHORT");
    }
}
