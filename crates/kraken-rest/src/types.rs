//! Types for Kraken REST API requests and responses

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Market Data Types
// ============================================================================

/// Server time
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    /// Unix timestamp in seconds
    pub unixtime: i64,
    /// RFC 1123 formatted time
    pub rfc1123: String,
}

// ============================================================================
// Account Types
// ============================================================================

/// Account balances by asset
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct BalanceInfo(pub HashMap<String, Decimal>);

impl BalanceInfo {
    /// Get balance for a specific asset
    pub fn get(&self, asset: &str) -> Option<Decimal> {
        self.0.get(asset).copied()
    }

    /// Get all non-zero balances
    pub fn non_zero(&self) -> HashMap<&str, Decimal> {
        self.0
            .iter()
            .filter(|(_, balance)| !balance.is_zero())
            .map(|(asset, balance)| (asset.as_str(), *balance))
            .collect()
    }
}

/// WebSocket authentication token
#[derive(Debug, Clone, Deserialize)]
pub struct WsToken {
    /// The authentication token
    pub token: String,
    /// Token expiration in seconds (typically 900 = 15 minutes)
    pub expires: u64,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    Market,
    Limit,
    StopLoss,
    TakeProfit,
    StopLossLimit,
    TakeProfitLimit,
    SettlePosition,
}

impl OrderType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::StopLoss => "stop-loss",
            Self::TakeProfit => "take-profit",
            Self::StopLossLimit => "stop-loss-limit",
            Self::TakeProfitLimit => "take-profit-limit",
            Self::SettlePosition => "settle-position",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order description as echoed back by the API
///
/// `AddOrder` only fills `order` (and `close` for conditional closes); the
/// other fields appear on order queries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderDescription {
    /// Asset pair
    #[serde(default)]
    pub pair: Option<String>,
    /// Type (buy/sell)
    #[serde(rename = "type", default)]
    pub side: Option<OrderSide>,
    /// Order type
    #[serde(default)]
    pub ordertype: Option<String>,
    /// Primary price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Secondary price
    #[serde(default)]
    pub price2: Option<Decimal>,
    /// Leverage
    #[serde(default)]
    pub leverage: Option<String>,
    /// Human readable order description
    pub order: String,
    /// Conditional close order description
    #[serde(default)]
    pub close: Option<String>,
}

/// Response to `AddOrder`
#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderResponse {
    /// Order description
    pub descr: OrderDescription,
    /// Transaction IDs (empty when only validating)
    #[serde(default)]
    pub txid: Vec<String>,
}

/// Response to `CancelOrder`
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResult {
    /// Number of orders cancelled
    pub count: u32,
    /// Cancellation pending
    #[serde(default)]
    pub pending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_info() {
        let json = r#"{"ZUSD": "171288.6158", "XXBT": "0.0000000000", "XETH": "12.5"}"#;
        let balance: BalanceInfo = serde_json::from_str(json).unwrap();

        assert_eq!(balance.get("ZUSD"), Some(dec!(171288.6158)));
        assert_eq!(balance.get("DOGE"), None);

        let non_zero = balance.non_zero();
        assert_eq!(non_zero.len(), 2);
        assert!(!non_zero.contains_key("XXBT"));
    }

    #[test]
    fn test_add_order_response() {
        let response: AddOrderResponse = serde_json::from_str(
            r#"{
                "descr": {"order": "buy 1.25000000 XBTUSD @ limit 27500.0"},
                "txid": ["OU22CG-KLAF2-FWUDD7"]
            }"#,
        )
        .unwrap();

        assert_eq!(response.descr.order, "buy 1.25000000 XBTUSD @ limit 27500.0");
        assert_eq!(response.txid, vec!["OU22CG-KLAF2-FWUDD7".to_string()]);
        assert!(response.descr.price.is_none());
    }

    #[test]
    fn test_full_order_description() {
        let descr: OrderDescription = serde_json::from_str(
            r#"{
                "pair": "XBTUSD",
                "type": "sell",
                "ordertype": "limit",
                "price": "30010.0",
                "price2": "0",
                "leverage": "none",
                "order": "sell 0.50000000 XBTUSD @ limit 30010.0",
                "close": ""
            }"#,
        )
        .unwrap();

        assert_eq!(descr.side, Some(OrderSide::Sell));
        assert_eq!(descr.price, Some(dec!(30010.0)));
        assert_eq!(descr.price2, Some(Decimal::ZERO));
        assert_eq!(descr.leverage.as_deref(), Some("none"));
    }

    #[test]
    fn test_validate_only_response_has_no_txid() {
        let response: AddOrderResponse =
            serde_json::from_str(r#"{"descr": {"order": "buy 0.001 XBTUSD @ market"}}"#).unwrap();
        assert!(response.txid.is_empty());
    }

    #[test]
    fn test_wire_strings() {
        assert_eq!(OrderSide::Buy.to_string(), "buy");
        assert_eq!(OrderType::StopLossLimit.to_string(), "stop-loss-limit");
        assert_eq!(
            serde_json::to_string(&OrderType::TakeProfit).unwrap(),
            "\"take-profit\""
        );
    }
}
