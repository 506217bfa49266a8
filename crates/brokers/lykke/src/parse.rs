//! Reshaping of Lykke payloads into the normalized schema.

use lykke_core::*;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::protocol::*;

/// Decode `raw` into a typed wire record, naming the payload on failure.
fn decode<T: DeserializeOwned>(raw: &Value, what: &str) -> Result<T, ExchangeError> {
    T::deserialize(raw).map_err(|e| ExchangeError::UnexpectedResponse(format!("{}: {}", what, e)))
}

fn as_array<'a>(raw: &'a Value, what: &str) -> Result<&'a Vec<Value>, ExchangeError> {
    raw.as_array()
        .ok_or_else(|| ExchangeError::UnexpectedResponse(format!("{}: expected a list", what)))
}

/// `10^exp` as a decimal.
pub fn pow10(exp: i64) -> Result<Decimal, ExchangeError> {
    let magnitude = exp.unsigned_abs();
    if magnitude > 28 {
        return Err(ExchangeError::UnexpectedResponse(format!(
            "precision {} is out of range",
            exp
        )));
    }
    let magnitude = magnitude as u32;
    if exp < 0 {
        Ok(Decimal::new(1, magnitude))
    } else {
        Ok(Decimal::from_i128_with_scale(10i128.pow(magnitude), 0))
    }
}

/// Normalize one `AssetPairs` entry.
pub fn parse_market(raw: &Value, fees: &TradingFees) -> Result<Market, ExchangeError> {
    let pair: AssetPair = decode(raw, "asset pair")?;
    let precision = MarketPrecision {
        amount: pair.accuracy,
        price: pair.inverted_accuracy,
    };
    let amount_step = pow10(-(precision.amount as i64))?;

    Ok(Market {
        id: pair.id,
        symbol: pair.name,
        base: common_currency_code(&pair.base_asset_id),
        quote: common_currency_code(&pair.quoting_asset_id),
        base_id: pair.base_asset_id,
        quote_id: pair.quoting_asset_id,
        active: true,
        precision,
        limits: MarketLimits {
            amount: MinMax {
                min: Some(amount_step),
                max: Some(pow10(precision.amount as i64)?),
            },
            price: MinMax {
                min: Some(pow10(-(precision.price as i64))?),
                max: Some(pow10(precision.price as i64)?),
            },
        },
        lot: amount_step,
        maker: fees.maker,
        taker: fees.taker,
        tier_based: fees.tier_based,
        percentage: fees.percentage,
        info: raw.clone(),
    })
}

pub fn parse_markets(raw: &Value, fees: &TradingFees) -> Result<Vec<Market>, ExchangeError> {
    as_array(raw, "asset pairs")?
        .iter()
        .map(|entry| parse_market(entry, fees))
        .collect()
}

/// Normalize an `AllAssetPairRates` response. Only bid and ask are known.
pub fn parse_ticker(
    raw: &Value,
    market: Option<&Market>,
    timestamp: i64,
) -> Result<Ticker, ExchangeError> {
    let envelope: RateEnvelope = decode(raw, "rate")?;
    let rate = envelope.result.rate;

    Ok(Ticker {
        symbol: market.map(|m| m.symbol.clone()),
        timestamp,
        datetime: iso8601(timestamp),
        high: None,
        low: None,
        bid: rate.bid,
        ask: rate.ask,
        vwap: None,
        open: None,
        close: None,
        first: None,
        last: None,
        change: None,
        percentage: None,
        average: None,
        base_volume: None,
        quote_volume: None,
        info: raw.get("Result").cloned().unwrap_or(Value::Null),
    })
}

/// Normalize an `OrderBooks` response.
///
/// Bids keep a non-negative volume and asks carry a non-positive one. Levels
/// stay in exchange order.
pub fn parse_order_book(raw: &Value, timestamp: i64) -> Result<OrderBook, ExchangeError> {
    let sides: Vec<OrderBookSide> = decode(raw, "order book")?;
    let mut bids = Vec::new();
    let mut asks = Vec::new();

    for side in sides {
        if side.is_buy {
            bids.extend(side.prices.iter().map(|l| [l.price, l.volume.abs()]));
        } else {
            asks.extend(side.prices.iter().map(|l| [l.price, -l.volume.abs()]));
        }
    }

    Ok(OrderBook {
        bids,
        asks,
        timestamp,
        datetime: iso8601(timestamp),
    })
}

/// Normalize a `Wallets` response. `free` is derived as `total - used` and is
/// not floored at zero.
pub fn parse_balance(raw: Value) -> Result<Balances, ExchangeError> {
    let wallets: Vec<Wallet> = decode(&raw, "wallets")?;
    let mut balances = Balances::default();

    for wallet in wallets {
        let used = wallet.reserved;
        let total = wallet.balance;
        let free = total.checked_sub(used).ok_or_else(|| {
            ExchangeError::UnexpectedResponse(format!(
                "wallet {}: balance {} minus reserved {} is out of range",
                wallet.asset_id, total, used
            ))
        })?;
        balances.insert(&wallet.asset_id, Balance { free, used, total });
    }

    balances.info = raw;
    Ok(balances)
}

/// Normalize an order record. Symbol, side and timestamp are not recoverable
/// from the payload and stay unset.
pub fn parse_order(raw: &Value) -> Result<Order, ExchangeError> {
    let record: OrderRecord = decode(raw, "order")?;
    Ok(Order {
        id: record.id,
        datetime: record.last_match_time,
        timestamp: None,
        status: record.status,
        symbol: None,
        side: None,
        amount: record.volume,
        price: record.price,
        info: raw.clone(),
    })
}

pub fn parse_orders(raw: &Value) -> Result<Vec<Order>, ExchangeError> {
    as_array(raw, "orders")?.iter().map(parse_order).collect()
}

/// Wrap a limit-order submission result. The exchange answers with the bare
/// order id.
pub fn parse_limit_placement(raw: Value) -> OrderPlacement {
    let id = match &raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    OrderPlacement { id: Some(id), info: raw }
}

/// Market orders do not return an order id.
pub fn parse_market_placement(raw: Value) -> OrderPlacement {
    OrderPlacement { id: None, info: raw }
}
