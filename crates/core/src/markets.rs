use crate::models::Market;
use crate::traits::ExchangeError;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory market table shared by an adapter's operations.
///
/// Populated once from the exchange listing and replaced wholesale on reload.
#[derive(Default)]
pub struct MarketCache {
    by_symbol: RwLock<HashMap<String, Market>>,
}

impl MarketCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.by_symbol.read().await.is_empty()
    }

    /// Replace the cached markets.
    pub async fn replace(&self, markets: Vec<Market>) {
        let count = markets.len();
        let index = markets
            .into_iter()
            .map(|market| (market.symbol.clone(), market))
            .collect();
        *self.by_symbol.write().await = index;
        tracing::debug!(count, "Market cache replaced");
    }

    pub async fn snapshot(&self) -> HashMap<String, Market> {
        self.by_symbol.read().await.clone()
    }

    pub async fn market(&self, symbol: &str) -> Result<Market, ExchangeError> {
        self.by_symbol
            .read()
            .await
            .get(symbol)
            .cloned()
            .ok_or_else(|| ExchangeError::BadSymbol(symbol.to_string()))
    }
}
