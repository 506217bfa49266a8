use lykke_brokers_common::HttpMethod;

/// Endpoint groups that share a base URL and credential requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiTier {
    /// Rate lookups served by the mobile API.
    Mobile,
    Public,
    /// Requires the `api-key` header.
    Private,
}

impl ApiTier {
    pub const ALL: [ApiTier; 3] = [ApiTier::Mobile, ApiTier::Public, ApiTier::Private];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiTier::Mobile => "mobile",
            ApiTier::Public => "public",
            ApiTier::Private => "private",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, ApiTier::Private)
    }
}

/// Every REST route the adapter calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AllAssetPairRates,
    AssetPairs,
    OrderBooks,
    Orders,
    Order,
    Wallets,
    PlaceLimitOrder,
    PlaceMarketOrder,
    CancelOrder,
}

impl Endpoint {
    pub fn tier(&self) -> ApiTier {
        match self {
            Endpoint::AllAssetPairRates => ApiTier::Mobile,
            Endpoint::AssetPairs | Endpoint::OrderBooks => ApiTier::Public,
            _ => ApiTier::Private,
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::PlaceLimitOrder | Endpoint::PlaceMarketOrder | Endpoint::CancelOrder => {
                HttpMethod::Post
            }
            _ => HttpMethod::Get,
        }
    }

    /// Path template relative to the tier's base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::AllAssetPairRates => "AllAssetPairRates/{market}",
            Endpoint::AssetPairs => "AssetPairs",
            Endpoint::OrderBooks => "OrderBooks/{AssetPairId}",
            Endpoint::Orders => "Orders",
            Endpoint::Order => "Orders/{id}",
            Endpoint::Wallets => "Wallets",
            Endpoint::PlaceLimitOrder => "Orders/limit",
            Endpoint::PlaceMarketOrder => "Orders/market",
            Endpoint::CancelOrder => "Orders/{id}/Cancel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_private_tier_requires_auth() {
        assert!(!ApiTier::Mobile.requires_auth());
        assert!(!ApiTier::Public.requires_auth());
        assert!(ApiTier::Private.requires_auth());
    }

    #[test]
    fn test_writes_are_private_posts() {
        for endpoint in [
            Endpoint::PlaceLimitOrder,
            Endpoint::PlaceMarketOrder,
            Endpoint::CancelOrder,
        ] {
            assert_eq!(endpoint.method(), HttpMethod::Post);
            assert_eq!(endpoint.tier(), ApiTier::Private);
        }
        assert_eq!(Endpoint::AllAssetPairRates.tier(), ApiTier::Mobile);
        assert_eq!(Endpoint::OrderBooks.method(), HttpMethod::Get);
    }
}
