//! Wire records for the Lykke REST API.
//!
//! Lykke uses PascalCase field names throughout. Inbound records only name
//! the fields the adapter reads; the full payload is kept separately as
//! `info` on the normalized types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Entry of `GET AssetPairs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetPair {
    pub id: String,
    pub name: String,
    pub base_asset_id: String,
    pub quoting_asset_id: String,
    /// Decimal places for amounts.
    pub accuracy: u32,
    /// Decimal places for prices.
    pub inverted_accuracy: u32,
}

/// Response of `GET AllAssetPairRates/{market}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateEnvelope {
    pub result: RateResult,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateResult {
    pub rate: Rate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rate {
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
}

/// One side of `GET OrderBooks/{AssetPairId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderBookSide {
    pub is_buy: bool,
    pub prices: Vec<PriceLevel>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceLevel {
    pub price: Decimal,
    pub volume: Decimal,
}

/// Entry of `GET Wallets`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Wallet {
    pub asset_id: String,
    pub balance: Decimal,
    pub reserved: Decimal,
}

/// Response of `GET Orders/{id}` and entry of `GET Orders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderRecord {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub volume: Option<Decimal>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub last_match_time: Option<String>,
}

/// Body of `POST Orders/limit` and `POST Orders/market`.
///
/// Numbers go out as JSON numbers, not strings, with every digit of the
/// `Decimal` kept.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaceOrderRequest {
    pub asset_pair_id: String,
    /// `Buy` or `Sell`.
    pub order_action: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub volume: Decimal,
    /// Asset being spent; market orders only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Limit orders only.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub price: Option<Decimal>,
}
