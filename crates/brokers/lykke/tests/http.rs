use lykke_core::{Exchange, ExchangeError, OrderType, Params, Side};
use lykke_exchange::{LykkeConfig, LykkeExchange, LykkeUrls, TierUrls};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, api_key: Option<&str>) -> LykkeConfig {
    let tiers = TierUrls::uniform(&server.uri());
    LykkeConfig {
        api_key: api_key.map(str::to_string),
        urls: LykkeUrls {
            production: tiers.clone(),
            test: tiers,
        },
        ..Default::default()
    }
}

async fn mount_asset_pairs(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/AssetPairs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Id": "BTCUSD", "Name": "BTC/USD", "BaseAssetId": "BTC", "QuotingAssetId": "USD",
             "Accuracy": 8, "InvertedAccuracy": 3}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn balance_is_fetched_with_api_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Wallets"))
        .and(header("api-key", "hft-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"AssetId": "BTC", "Balance": 10, "Reserved": 2},
            {"AssetId": "USD", "Balance": 250.5, "Reserved": 0}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let exchange = LykkeExchange::new(config_for(&server, Some("hft-key"))).unwrap();
    let balances = exchange.fetch_balance().await.unwrap();

    assert_eq!(balances.free["BTC"], dec!(8));
    assert_eq!(balances.total["USD"], dec!(250.5));
}

#[tokio::test]
async fn missing_api_key_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Wallets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let exchange = LykkeExchange::new(config_for(&server, None)).unwrap();
    let result = exchange.fetch_balance().await;

    assert!(matches!(result, Err(ExchangeError::AuthenticationRequired(_))));
}

#[tokio::test]
async fn limit_order_is_posted_as_json() {
    let server = MockServer::start().await;
    mount_asset_pairs(&server).await;
    Mock::given(method("POST"))
        .and(path("/Orders/limit"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "AssetPairId": "BTCUSD",
            "OrderAction": "Buy",
            "Volume": 0.25,
            "Price": 9000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("0f3c-order")))
        .expect(1)
        .mount(&server)
        .await;

    let exchange = LykkeExchange::new(config_for(&server, Some("hft-key"))).unwrap();
    let placement = exchange
        .create_order(
            "BTC/USD",
            OrderType::Limit,
            Side::Buy,
            dec!(0.25),
            Some(dec!(9000)),
            Params::new(),
        )
        .await
        .unwrap();

    assert_eq!(placement.id.as_deref(), Some("0f3c-order"));
    assert_eq!(placement.info, json!("0f3c-order"));
}

#[tokio::test]
async fn open_orders_send_status_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Orders"))
        .and(query_param("status", "InOrderBook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Id": "o1", "Status": "InOrderBook", "Volume": 1, "Price": 100}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let exchange = LykkeExchange::new(config_for(&server, Some("hft-key"))).unwrap();
    let orders = exchange.fetch_open_orders(Params::new()).await.unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status.as_deref(), Some("InOrderBook"));
}

#[tokio::test]
async fn empty_cancel_response_decodes_to_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Orders/o1/Cancel"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let exchange = LykkeExchange::new(config_for(&server, Some("hft-key"))).unwrap();
    let response = exchange.cancel_order("o1").await.unwrap();

    assert!(response.is_null());
}

#[tokio::test]
async fn error_status_is_surfaced_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Orders/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let exchange = LykkeExchange::new(config_for(&server, Some("hft-key"))).unwrap();

    match exchange.fetch_order("missing", Params::new()).await {
        Err(ExchangeError::Http { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_payload_is_an_unexpected_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/AssetPairs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let exchange = LykkeExchange::new(config_for(&server, None)).unwrap();

    assert!(matches!(
        exchange.fetch_markets().await,
        Err(ExchangeError::UnexpectedResponse(_))
    ));
}
