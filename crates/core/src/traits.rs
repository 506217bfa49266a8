use crate::models::*;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Extra exchange-specific request parameters, merged into the request the
/// adapter builds.
pub type Params = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during exchange operations.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Authentication required: {0} is not configured")]
    AuthenticationRequired(String),
    #[error("Unknown symbol: {0}")]
    BadSymbol(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Invalid order: {0}")]
    InvalidOrder(String),
    #[error("Unexpected exchange response shape: {0}")]
    UnexpectedResponse(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl From<serde_json::Error> for ExchangeError {
    fn from(e: serde_json::Error) -> Self {
        ExchangeError::UnexpectedResponse(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Exchange metadata
// ---------------------------------------------------------------------------

/// Which unified operations an exchange supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub fetch_markets: bool,
    pub fetch_ticker: bool,
    pub fetch_order_book: bool,
    pub fetch_trades: bool,
    pub fetch_ohlcv: bool,
    pub fetch_balance: bool,
    pub create_order: bool,
    pub cancel_order: bool,
    pub fetch_order: bool,
    pub fetch_orders: bool,
    pub fetch_open_orders: bool,
    pub fetch_closed_orders: bool,
}

/// Credentials an exchange needs for its private endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredCredentials {
    pub api_key: bool,
    pub secret: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingFees {
    pub tier_based: bool,
    pub percentage: bool,
    pub maker: Decimal,
    pub taker: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingFees {
    pub tier_based: bool,
    pub percentage: bool,
    pub withdraw: HashMap<String, Decimal>,
    pub deposit: HashMap<String, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub trading: TradingFees,
    pub funding: FundingFees,
}

/// Static description of an exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeDescription {
    pub id: String,
    pub name: String,
    pub countries: Vec<String>,
    pub version: String,
    /// Minimum delay between requests, in milliseconds.
    pub rate_limit_ms: u64,
    pub has: Capabilities,
    pub required_credentials: RequiredCredentials,
    pub fees: FeeSchedule,
    pub www: String,
    pub doc: Vec<String>,
    pub fees_url: String,
    /// Base URL per endpoint tier currently in use.
    pub api: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Exchange Trait
// ---------------------------------------------------------------------------

/// Unified trading interface implemented by every exchange adapter.
#[async_trait]
pub trait Exchange: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn describe(&self) -> ExchangeDescription;

    /// Fetch the market listing from the exchange (uncached).
    async fn fetch_markets(&self) -> Result<Vec<Market>, ExchangeError>;

    /// Fetch and cache markets, keyed by symbol. Returns the cache when it is
    /// already populated and `reload` is false.
    async fn load_markets(&self, reload: bool) -> Result<HashMap<String, Market>, ExchangeError>;

    async fn fetch_ticker(&self, symbol: &str, params: Params) -> Result<Ticker, ExchangeError>;

    async fn fetch_order_book(
        &self,
        symbol: &str,
        params: Params,
    ) -> Result<OrderBook, ExchangeError>;

    async fn fetch_balance(&self) -> Result<Balances, ExchangeError>;

    /// Public trade history. Unsupported unless an adapter overrides it.
    async fn fetch_trades(&self, _symbol: &str) -> Result<Vec<serde_json::Value>, ExchangeError> {
        Err(ExchangeError::NotSupported("fetch_trades".to_string()))
    }

    /// Candlestick history. Unsupported unless an adapter overrides it.
    async fn fetch_ohlcv(
        &self,
        _symbol: &str,
        _timeframe: &str,
    ) -> Result<Vec<serde_json::Value>, ExchangeError> {
        Err(ExchangeError::NotSupported("fetch_ohlcv".to_string()))
    }

    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: Side,
        amount: Decimal,
        price: Option<Decimal>,
        params: Params,
    ) -> Result<OrderPlacement, ExchangeError>;

    /// Cancel an order. Returns the raw exchange response.
    async fn cancel_order(&self, id: &str) -> Result<serde_json::Value, ExchangeError>;

    async fn fetch_order(&self, id: &str, params: Params) -> Result<Order, ExchangeError>;

    async fn fetch_orders(&self, params: Params) -> Result<Vec<Order>, ExchangeError>;

    async fn fetch_open_orders(&self, params: Params) -> Result<Vec<Order>, ExchangeError>;

    async fn fetch_closed_orders(&self, params: Params) -> Result<Vec<Order>, ExchangeError>;

    /// Dispatch to the listing that matches `filter`.
    async fn fetch_orders_by(
        &self,
        filter: OrderFilter,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError> {
        match filter {
            OrderFilter::All => self.fetch_orders(params).await,
            OrderFilter::Open => self.fetch_open_orders(params).await,
            OrderFilter::Closed => self.fetch_closed_orders(params).await,
        }
    }
}
