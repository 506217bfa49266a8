use lykke_core::{FeeSchedule, FundingFees, TradingFees};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::endpoints::ApiTier;

/// Base URL for each endpoint tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierUrls {
    pub mobile: String,
    pub public: String,
    pub private: String,
}

impl TierUrls {
    pub fn get(&self, tier: ApiTier) -> &str {
        match tier {
            ApiTier::Mobile => &self.mobile,
            ApiTier::Public => &self.public,
            ApiTier::Private => &self.private,
        }
    }

    /// Point every tier at one host (used for local mocks and proxies).
    pub fn uniform(base: &str) -> Self {
        Self {
            mobile: base.to_string(),
            public: base.to_string(),
            private: base.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LykkeUrls {
    pub production: TierUrls,
    pub test: TierUrls,
}

impl Default for LykkeUrls {
    fn default() -> Self {
        Self {
            production: TierUrls {
                mobile: "https://api.lykkex.com/api".to_string(),
                public: "https://hft-api.lykke.com/api".to_string(),
                private: "https://hft-api.lykke.com/api".to_string(),
            },
            test: TierUrls {
                mobile: "https://api.lykkex.com/api".to_string(),
                public: "https://hft-service-dev.lykkex.net/api".to_string(),
                private: "https://hft-service-dev.lykkex.net/api".to_string(),
            },
        }
    }
}

/// Configuration for the Lykke adapter.
///
/// Every field has a default, so a TOML file only needs to name what it
/// changes:
///
/// ```toml
/// api_key = "..."
/// sandbox = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LykkeConfig {
    /// HFT API key; required for private endpoints only.
    pub api_key: Option<String>,
    /// Use the test environment URLs.
    pub sandbox: bool,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub urls: LykkeUrls,
}

impl Default for LykkeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            sandbox: false,
            timeout_secs: 10,
            urls: LykkeUrls::default(),
        }
    }
}

impl LykkeConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// URLs for the active environment.
    pub fn tier_urls(&self) -> &TierUrls {
        if self.sandbox {
            &self.urls.test
        } else {
            &self.urls.production
        }
    }

    pub fn base_url(&self, tier: ApiTier) -> &str {
        self.tier_urls().get(tier)
    }
}

/// Published Lykke fee schedule.
pub fn default_fees() -> FeeSchedule {
    FeeSchedule {
        trading: TradingFees {
            tier_based: false,
            percentage: true,
            maker: Decimal::new(10, 4), // 0.0010
            taker: Decimal::new(19, 4), // 0.0019
        },
        funding: FundingFees {
            tier_based: false,
            percentage: false,
            withdraw: HashMap::from([("BTC".to_string(), Decimal::new(1, 3))]),
            deposit: HashMap::from([("BTC".to_string(), Decimal::ZERO)]),
        },
    }
}
