//! Limit-order types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::scale::{
    decode_scaled, decode_scaled_opt, COLLATERAL_DECIMALS, LEVERAGE_DECIMALS, PRICE_DECIMALS,
};
use crate::types::Side;

/// Limit-order record as the subgraph returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLimitOrder {
    /// Order identifier
    pub id: String,
    /// Pair identifier
    pub pair_id: String,
    /// Buy (`true`) or sell (`false`)
    pub is_buy: bool,
    /// Leverage, 2 decimals
    pub leverage: String,
    /// Collateral in USDC, 6 decimals
    pub collateral: String,
    /// Target entry price, 18 decimals
    pub open_price: String,
    /// Stop-loss trigger, 18 decimals; `"0"` or null when unset
    #[serde(default)]
    pub stop_loss_price: Option<String>,
    /// Take-profit trigger, 18 decimals; `"0"` or null when unset
    #[serde(default)]
    pub take_profit_price: Option<String>,
}

/// A pending, unfilled conditional order awaiting its target price.
///
/// The query is scoped to pending orders only; fills and cancellations are
/// observed as disappearance from subsequent fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrder {
    /// Order identifier
    pub id: String,
    /// Pair this order targets (unresolved id)
    pub pair_id: String,
    /// Buy (`true`) or sell (`false`)
    pub is_buy: bool,
    /// Order leverage
    pub leverage: Decimal,
    /// Posted collateral in USDC
    pub collateral: Decimal,
    /// Target entry price
    pub open_price: Decimal,
    /// Stop-loss trigger, `None` when the order has none
    pub stop_loss_price: Option<Decimal>,
    /// Take-profit trigger, `None` when the order has none
    pub take_profit_price: Option<Decimal>,
}

impl LimitOrder {
    /// Direction the order would open.
    pub fn side(&self) -> Side {
        if self.is_buy {
            Side::Long
        } else {
            Side::Short
        }
    }
}

impl TryFrom<RawLimitOrder> for LimitOrder {
    type Error = DataError;

    fn try_from(raw: RawLimitOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            pair_id: raw.pair_id,
            is_buy: raw.is_buy,
            leverage: decode_scaled(&raw.leverage, LEVERAGE_DECIMALS)?,
            collateral: decode_scaled(&raw.collateral, COLLATERAL_DECIMALS)?,
            open_price: decode_scaled(&raw.open_price, PRICE_DECIMALS)?,
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
    fn test_raw_order_maps_to_limit_order() {
        let json = r#"{
            "id": "17",
            "pairId": "1",
            "isBuy": false,
            "leverage": "2500",
            "collateral": "1000000000",
            "openPrice": "3400000000000000000000",
            "stopLossPrice": "3600000000000000000000",
            "takeProfitPrice": "0"
        }"#;
        let raw: RawLimitOrder = serde_json::from_str(json).unwrap();
        let order = LimitOrder::try_from(raw).unwrap();

        assert_eq!(order.id, "17");
        assert_eq!(order.side(), Side::Short);
        assert_eq!(order.leverage, Decimal::from(25));
        assert_eq!(order.collateral, Decimal::from(1000));
        assert_eq!(order.open_price, Decimal::from(3400));
        assert_eq!(order.stop_loss_price, Some(Decimal::from(3600)));
        assert_eq!(order.take_profit_price, None);
    }
}
