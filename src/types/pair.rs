//! Trading-pair types.

use serde::{Deserialize, Serialize};

/// A trading pair registered on the protocol.
///
/// `OpenTrade`, `LimitOrder` and `HistoryEntry` reference pairs by id only;
/// resolving an id against the pair list is the caller's concern, and an id
/// with no matching pair passes through unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPair {
    /// Protocol-assigned pair identifier
    pub id: String,
    /// Base asset symbol
    pub from: String,
    /// Quote asset symbol
    pub to: String,
}

impl TradingPair {
    /// Render the pair as `"FROM/TO"`.
    pub fn symbol(&self) -> String {
        format!("{}/{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_deserialize() {
        let json = r#"{"id": "0", "from": "BTC", "to": "USD"}"#;
        let pair: TradingPair = serde_json::from_str(json).unwrap();
        assert_eq!(pair.id, "0");
        assert_eq!(pair.symbol(), "BTC/USD");
    }
}
