//! Lykke exchange adapter.
//!
//! Maps the unified [`lykke_core::Exchange`] interface onto Lykke's three REST
//! tiers (mobile rates, public market data, private HFT trading). Private
//! requests are authenticated with a static `api-key` header.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod parse;
pub mod protocol;

pub use client::LykkeExchange;
pub use config::{default_fees, LykkeConfig, LykkeUrls, TierUrls};
pub use endpoints::{ApiTier, Endpoint};
