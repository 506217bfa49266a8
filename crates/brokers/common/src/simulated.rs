use async_trait::async_trait;
use lykke_core::ExchangeError;
use tokio::sync::Mutex;

use crate::request::{HttpMethod, SignedRequest};
use crate::transport::Transport;

struct Route {
    method: HttpMethod,
    /// Matched against the end of the request URL path.
    path_suffix: String,
    response: serde_json::Value,
}

/// An in-memory transport for tests and dry runs.
///
/// Answers requests from canned responses and records every request it was
/// asked to execute, so callers can assert on what would have been sent.
#[derive(Default)]
pub struct SimulatedTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<SignedRequest>>,
}

impl SimulatedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned response for `method` requests whose path ends with
    /// `path_suffix`. Later registrations take precedence.
    pub async fn respond(&self, method: HttpMethod, path_suffix: &str, response: serde_json::Value) {
        self.routes.lock().await.insert(
            0,
            Route {
                method,
                path_suffix: path_suffix.to_string(),
                response,
            },
        );
    }

    /// Every request executed so far, oldest first.
    pub async fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn execute(&self, request: SignedRequest) -> Result<serde_json::Value, ExchangeError> {
        self.requests.lock().await.push(request.clone());

        let routes = self.routes.lock().await;
        routes
            .iter()
            .find(|r| r.method == request.method && request.path().ends_with(&r.path_suffix))
            .map(|r| r.response.clone())
            .ok_or_else(|| {
                ExchangeError::Network(format!(
                    "No simulated response for {} {}",
                    request.method, request.url
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn get(url: &str) -> SignedRequest {
        SignedRequest {
            url: url.to_string(),
            method: HttpMethod::Get,
            headers: Vec::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_routes_by_method_and_suffix() {
        let transport = SimulatedTransport::new();
        transport
            .respond(HttpMethod::Get, "/Wallets", json!([{"AssetId": "BTC"}]))
            .await;

        let value = transport
            .execute(get("https://x.test/api/Wallets?take=1"))
            .await
            .unwrap();
        assert_eq!(value[0]["AssetId"], "BTC");
        assert_eq!(transport.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_unrouted_request_fails_but_is_recorded() {
        let transport = SimulatedTransport::new();
        let result = transport.execute(get("https://x.test/api/Orders")).await;

        assert!(matches!(result, Err(ExchangeError::Network(_))));
        assert_eq!(transport.requests().await[0].url, "https://x.test/api/Orders");
    }

    #[tokio::test]
    async fn test_latest_registration_wins() {
        let transport = SimulatedTransport::new();
        transport.respond(HttpMethod::Get, "/Orders", json!(1)).await;
        transport.respond(HttpMethod::Get, "/Orders", json!(2)).await;

        let value = transport.execute(get("https://x.test/api/Orders")).await.unwrap();
        assert_eq!(value, json!(2));
    }
}
