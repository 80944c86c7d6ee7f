//! Fixed-point decoding for subgraph numeric fields.
//!
//! The subgraph encodes every numeric field as a decimal-scaled integer
//! string: a price of 65000 arrives as `"65000000000000000000000"` (18
//! decimals), a collateral of 250 USDC as `"250000000"` (6 decimals).
//! Decoding lifts those strings into exact [`Decimal`] values with the
//! source's own precision and nothing beyond it.

use rust_decimal::Decimal;
use thiserror::Error;

/// Scale of price-like fields (open price, stop loss, take profit).
pub const PRICE_DECIMALS: u32 = 18;

/// Scale of collateral and notional fields (USDC).
pub const COLLATERAL_DECIMALS: u32 = 6;

/// Scale of leverage fields.
pub const LEVERAGE_DECIMALS: u32 = 2;

/// Scale of profit-percent fields.
pub const PERCENT_DECIMALS: u32 = 6;

/// Error decoding a scaled integer string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    /// The field was not an integer string.
    #[error("not a scaled integer: {0:?}")]
    NotAnInteger(String),

    /// The value does not fit a 96-bit decimal mantissa.
    #[error("scaled value out of range: {0:?}")]
    OutOfRange(String),
}

/// Decode a scaled integer string into an exact decimal.
///
/// Trailing zeros are normalized away, so `"250000000"` at 6 decimals
/// decodes to `250`, not `250.000000`.
pub fn decode_scaled(raw: &str, decimals: u32) -> Result<Decimal, ScaleError> {
    let mantissa: i128 = raw
        .trim()
        .parse()
        .map_err(|_| ScaleError::NotAnInteger(raw.to_string()))?;
    Decimal::try_from_i128_with_scale(mantissa, decimals)
        .map(|value| value.normalize())
        .map_err(|_| ScaleError::OutOfRange(raw.to_string()))
}

/// Decode an optional field where both null and zero mean "unset".
///
/// The subgraph writes `"0"` for stop-loss and take-profit prices that were
/// never configured; zero is not a legal trigger price, so it decodes to
/// `None` rather than `Some(0)`.
pub fn decode_scaled_opt(
    raw: Option<&str>,
    decimals: u32,
) -> Result<Option<Decimal>, ScaleError> {
    match raw {
        None => Ok(None),
        Some(raw) => {
            let value = decode_scaled(raw, decimals)?;
            Ok((!value.is_zero()).then_some(value))
        }
    }
}
