use async_trait::async_trait;
use lykke_brokers_common::request::{append_query, extract_params, implode_params, omit};
use lykke_brokers_common::{HttpMethod, HttpTransport, SignedRequest, Transport};
use lykke_core::*;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{default_fees, LykkeConfig};
use crate::endpoints::{ApiTier, Endpoint};
use crate::parse;
use crate::protocol::PlaceOrderRequest;

/// Lykke exchange adapter.
///
/// Stateless apart from the market cache; every operation issues a single
/// request through the configured [`Transport`].
pub struct LykkeExchange {
    config: LykkeConfig,
    fees: FeeSchedule,
    transport: Arc<dyn Transport>,
    markets: MarketCache,
}

impl LykkeExchange {
    pub const ID: &'static str = "lykke";
    pub const NAME: &'static str = "Lykke";

    /// Create an adapter backed by a reqwest transport.
    pub fn new(config: LykkeConfig) -> Result<Self, ExchangeError> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: LykkeConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            fees: default_fees(),
            transport,
            markets: MarketCache::new(),
        }
    }

    /// Build the request for `endpoint`.
    ///
    /// Path placeholders are filled from `params`; the remaining params become
    /// the query string of a GET or the JSON body of a POST. Private endpoints
    /// get the `api-key` header and fail without one.
    pub fn sign(&self, endpoint: Endpoint, params: &Params) -> Result<SignedRequest, ExchangeError> {
        let tier = endpoint.tier();
        let mut headers = Vec::new();

        if tier.requires_auth() {
            let api_key = self
                .config
                .api_key
                .as_deref()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| ExchangeError::AuthenticationRequired("apiKey".to_string()))?;
            headers.push(("api-key".to_string(), api_key.to_string()));
            headers.push(("Accept".to_string(), "application/json".to_string()));
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let path = endpoint.path();
        let url = implode_params(self.config.base_url(tier), path, params)?;
        let query = omit(params, &extract_params(path));

        let method = endpoint.method();
        let (url, body) = match method {
            HttpMethod::Get => (append_query(&url, &query)?, None),
            HttpMethod::Post if query.is_empty() => (url, None),
            HttpMethod::Post => (url, Some(serde_json::to_string(&query)?)),
        };

        Ok(SignedRequest {
            url,
            method,
            headers,
            body,
        })
    }

    async fn request(&self, endpoint: Endpoint, params: Params) -> Result<Value, ExchangeError> {
        let request = self.sign(endpoint, &params)?;
        debug!(method = %request.method, url = %request.url, "Sending request");
        self.transport.execute(request).await
    }

    /// Look up a market, loading the listing on first use.
    pub async fn market(&self, symbol: &str) -> Result<Market, ExchangeError> {
        self.load_markets(false).await?;
        self.markets.market(symbol).await
    }

    async fn fetch_orders_with_status(
        &self,
        status: &str,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError> {
        let mut request = Params::new();
        request.insert("status".to_string(), json!(status));
        request.extend(params);
        let response = self.request(Endpoint::Orders, request).await?;
        parse::parse_orders(&response)
    }
}

fn single(key: &str, value: &str) -> Params {
    let mut params = Params::new();
    params.insert(key.to_string(), json!(value));
    params
}

#[async_trait]
impl Exchange for LykkeExchange {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> ExchangeDescription {
        let api = ApiTier::ALL
            .iter()
            .map(|tier| {
                (
                    tier.as_str().to_string(),
                    self.config.base_url(*tier).to_string(),
                )
            })
            .collect::<HashMap<_, _>>();

        ExchangeDescription {
            id: Self::ID.to_string(),
            name: Self::NAME.to_string(),
            countries: vec!["CH".to_string()],
            version: "v1".to_string(),
            rate_limit_ms: 200,
            has: Capabilities {
                fetch_markets: true,
                fetch_ticker: true,
                fetch_order_book: true,
                fetch_trades: false,
                fetch_ohlcv: false,
                fetch_balance: true,
                create_order: true,
                cancel_order: true,
                fetch_order: true,
                fetch_orders: true,
                fetch_open_orders: true,
                fetch_closed_orders: true,
            },
            required_credentials: RequiredCredentials {
                api_key: true,
                secret: false,
            },
            fees: self.fees.clone(),
            www: "https://www.lykke.com".to_string(),
            doc: vec![
                "https://hft-api.lykke.com/swagger/ui/".to_string(),
                "https://www.lykke.com/lykke_api".to_string(),
            ],
            fees_url: "https://www.lykke.com/trading-conditions".to_string(),
            api,
        }
    }

    async fn fetch_markets(&self) -> Result<Vec<Market>, ExchangeError> {
        let response = self.request(Endpoint::AssetPairs, Params::new()).await?;
        parse::parse_markets(&response, &self.fees.trading)
    }

    async fn load_markets(&self, reload: bool) -> Result<HashMap<String, Market>, ExchangeError> {
        if !reload && !self.markets.is_empty().await {
            return Ok(self.markets.snapshot().await);
        }
        let markets = self.fetch_markets().await?;
        info!(count = markets.len(), "Loaded Lykke markets");
        self.markets.replace(markets).await;
        Ok(self.markets.snapshot().await)
    }

    async fn fetch_ticker(&self, symbol: &str, params: Params) -> Result<Ticker, ExchangeError> {
        let market = self.market(symbol).await?;
        let mut request = single("market", &market.id);
        request.extend(params);
        let response = self.request(Endpoint::AllAssetPairRates, request).await?;
        parse::parse_ticker(&response, Some(&market), milliseconds())
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        params: Params,
    ) -> Result<OrderBook, ExchangeError> {
        let market = self.market(symbol).await?;
        let mut request = single("AssetPairId", &market.id);
        request.extend(params);
        let response = self.request(Endpoint::OrderBooks, request).await?;
        parse::parse_order_book(&response, milliseconds())
    }

    async fn fetch_balance(&self) -> Result<Balances, ExchangeError> {
        let response = self.request(Endpoint::Wallets, Params::new()).await?;
        parse::parse_balance(response)
    }

    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: Side,
        amount: Decimal,
        price: Option<Decimal>,
        params: Params,
    ) -> Result<OrderPlacement, ExchangeError> {
        if order_type == OrderType::Limit && price.is_none() {
            return Err(ExchangeError::InvalidOrder(
                "limit orders require a price".to_string(),
            ));
        }

        let market = self.market(symbol).await?;
        let order_action = match side {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        };
        let (endpoint, asset, price) = match order_type {
            OrderType::Market => {
                // The asset being spent: base on buy, quote on sell.
                let asset = match side {
                    Side::Buy => market.base.clone(),
                    Side::Sell => market.quote.clone(),
                };
                (Endpoint::PlaceMarketOrder, Some(asset), None)
            }
            OrderType::Limit => (Endpoint::PlaceLimitOrder, None, price),
        };

        let order = PlaceOrderRequest {
            asset_pair_id: market.id.clone(),
            order_action: order_action.to_string(),
            volume: amount,
            asset,
            price,
        };
        let mut request = match serde_json::to_value(&order)? {
            Value::Object(map) => map,
            _ => Params::new(),
        };
        request.extend(params);

        info!(
            symbol = %symbol,
            side = side.as_str(),
            order_type = ?order_type,
            amount = %amount,
            "Placing order"
        );
        let response = self.request(endpoint, request).await?;

        Ok(match order_type {
            OrderType::Market => parse::parse_market_placement(response),
            OrderType::Limit => parse::parse_limit_placement(response),
        })
    }

    async fn cancel_order(&self, id: &str) -> Result<Value, ExchangeError> {
        self.request(Endpoint::CancelOrder, single("id", id)).await
    }

    async fn fetch_order(&self, id: &str, params: Params) -> Result<Order, ExchangeError> {
        let mut request = single("id", id);
        request.extend(params);
        let response = self.request(Endpoint::Order, request).await?;
        parse::parse_order(&response)
    }

    async fn fetch_orders(&self, params: Params) -> Result<Vec<Order>, ExchangeError> {
        let response = self.request(Endpoint::Orders, params).await?;
        parse::parse_orders(&response)
    }

    async fn fetch_open_orders(&self, params: Params) -> Result<Vec<Order>, ExchangeError> {
        self.fetch_orders_with_status("InOrderBook", params).await
    }

    async fn fetch_closed_orders(&self, params: Params) -> Result<Vec<Order>, ExchangeError> {
        self.fetch_orders_with_status("Matched", params).await
    }
}
