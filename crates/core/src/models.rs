use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Time helpers
// ---------------------------------------------------------------------------

/// Current time in milliseconds since the Unix epoch.
pub fn milliseconds() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a millisecond timestamp as ISO-8601 (`2024-01-02T03:04:05.678Z`).
pub fn iso8601(timestamp: i64) -> Option<String> {
    Utc.timestamp_millis_opt(timestamp)
        .single()
        .map(|dt: DateTime<Utc>| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

/// Map exchange-specific asset codes onto their common names.
pub fn common_currency_code(code: &str) -> String {
    match code {
        "XBT" => "BTC".to_string(),
        "BCC" => "BCH".to_string(),
        "DRK" => "DASH".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Markets
// ---------------------------------------------------------------------------

/// Number of decimal places the exchange accepts for amounts and prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrecision {
    pub amount: u32,
    pub price: u32,
}

/// An inclusive range; either bound may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketLimits {
    pub amount: MinMax,
    pub price: MinMax,
}

/// A tradeable asset pair as listed by the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Exchange-native pair identifier (e.g. `BTCUSD`).
    pub id: String,
    /// Unified symbol (e.g. `BTC/USD`).
    pub symbol: String,
    pub base: String,
    pub quote: String,
    /// Exchange-native asset identifiers, before common-code mapping.
    pub base_id: String,
    pub quote_id: String,
    pub active: bool,
    pub precision: MarketPrecision,
    pub limits: MarketLimits,
    /// Smallest tradeable amount increment.
    pub lot: Decimal,
    pub maker: Decimal,
    pub taker: Decimal,
    pub tier_based: bool,
    pub percentage: bool,
    pub info: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

/// Price statistics snapshot for one market.
///
/// Fields the exchange does not report are kept in the schema as `None`
/// rather than omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: Option<String>,
    pub timestamp: i64,
    pub datetime: Option<String>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub vwap: Option<Decimal>,
    pub open: Option<Decimal>,
    pub close: Option<Decimal>,
    pub first: Option<Decimal>,
    pub last: Option<Decimal>,
    pub change: Option<Decimal>,
    pub percentage: Option<Decimal>,
    pub average: Option<Decimal>,
    pub base_volume: Option<Decimal>,
    pub quote_volume: Option<Decimal>,
    pub info: serde_json::Value,
}

/// `[price, volume]`.
pub type OrderBookLevel = [Decimal; 2];

/// Resting depth for one market.
///
/// Ask volumes are stored negated; bids keep their sign. Levels are kept in
/// the order the exchange returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub bids: Vec<OrderBookLevel>,
    pub asks: Vec<OrderBookLevel>,
    pub timestamp: i64,
    pub datetime: Option<String>,
}

// ---------------------------------------------------------------------------
// Balances
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub free: Decimal,
    pub used: Decimal,
    pub total: Decimal,
}

/// Account balances keyed by asset code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    pub free: HashMap<String, Decimal>,
    pub used: HashMap<String, Decimal>,
    pub total: HashMap<String, Decimal>,
    /// Per-asset records, mirroring the three maps above.
    pub assets: HashMap<String, Balance>,
    pub info: serde_json::Value,
}

impl Balances {
    /// Record one asset in all three maps and the per-asset table.
    pub fn insert(&mut self, asset: &str, balance: Balance) {
        self.free.insert(asset.to_string(), balance.free);
        self.used.insert(asset.to_string(), balance.used);
        self.total.insert(asset.to_string(), balance.total);
        self.assets.insert(asset.to_string(), balance);
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

/// The type of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Market,
    Limit,
}

/// Status filter for order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderFilter {
    All,
    Open,
    Closed,
}

/// An order as reported by the exchange.
///
/// Only the fields the exchange exposes are populated; `status` is the
/// exchange's own vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub datetime: Option<String>,
    pub timestamp: Option<i64>,
    pub status: Option<String>,
    pub symbol: Option<String>,
    pub side: Option<Side>,
    pub amount: Option<Decimal>,
    pub price: Option<Decimal>,
    pub info: serde_json::Value,
}

/// Acknowledgement returned when an order is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlacement {
    /// Exchange order id; `None` when the exchange does not return one.
    pub id: Option<String>,
    pub info: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_iso8601_formats_milliseconds() {
        assert_eq!(
            iso8601(1_700_000_000_123).as_deref(),
            Some("2023-11-14T22:13:20.123Z")
        );
    }

    #[test]
    fn test_common_currency_code() {
        assert_eq!(common_currency_code("XBT"), "BTC");
        assert_eq!(common_currency_code("BCC"), "BCH");
        assert_eq!(common_currency_code("CHF"), "CHF");
    }

    #[test]
    fn test_balances_insert_fills_every_view() {
        let mut balances = Balances::default();
        balances.insert(
            "ETH",
            Balance {
                free: dec!(1.5),
                used: dec!(0.5),
                total: dec!(2),
            },
        );

        assert_eq!(balances.free["ETH"], dec!(1.5));
        assert_eq!(balances.used["ETH"], dec!(0.5));
        assert_eq!(balances.total["ETH"], dec!(2));
        assert_eq!(balances.assets["ETH"].free, dec!(1.5));
    }
}
