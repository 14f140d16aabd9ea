//! # Routes
//!
//! Axum router configuration for the storefront.

use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
///   - GET /               - Landing page
///   - GET /health         - Health check
///   - GET /checkout/{id}  - Create a checkout session for product `id`
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/checkout/{product_id}", get(handlers::checkout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use shop_core::{CheckoutGateway, GatewayError, SessionParams, SessionRef, StoreConfig};
    use std::future::IntoFuture;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const STORE: &str = r#"
stripe_key = "sk_test_abc123"
publishable_key = "pk_test_xyz789"
currency = "usd"

[[products]]
id = "p1"
title = "Widget"
description = "A widget"
price = "9.99"

[[products]]
id = "p2"
title = "Gadget"
description = "A gadget"
price = "1000.50"
"#;

    /// Records every request; fails with `error` when set
    #[derive(Default)]
    struct MockGateway {
        calls: Mutex<Vec<SessionParams>>,
        error: Option<&'static str>,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl CheckoutGateway for MockGateway {
        async fn create_session(
            &self,
            params: &SessionParams,
        ) -> Result<SessionRef, GatewayError> {
            self.calls.lock().unwrap().push(params.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(message) = self.error {
                return Err(GatewayError::Network(message.to_string()));
            }
            Ok(SessionRef {
                id: format!(
                    "cs_test_{}_{}_{}",
                    params.product_id,
                    params.total(),
                    params.cancel_url.rsplit('/').next().unwrap_or_default()
                ),
                url: None,
            })
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }

    fn server_with(store_toml: &str, gateway: Arc<MockGateway>) -> TestServer {
        let store = StoreConfig::from_toml(store_toml).unwrap();
        let state = AppState::new(store, gateway);
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_landing_and_health() {
        let server = server_with(STORE, Arc::new(MockGateway::default()));

        let response = server.get("/").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "hello");

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<serde_json::Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn test_checkout_renders_session() {
        let gateway = Arc::new(MockGateway::default());
        let server = server_with(STORE, gateway.clone());

        let response = server.get("/checkout/p1").await;

        response.assert_status_ok();
        let body = response.text();
        assert!(body.contains(r#"sessionId: "cs_test_p1_999_p1""#));
        assert!(body.contains(r#"Stripe("pk_test_xyz789")"#));

        let calls = gateway.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let item = &calls[0].line_items[0];
        assert_eq!(item.amount, 999);
        assert_eq!(item.currency.as_str(), "usd");
        assert_eq!(item.quantity, 1);
        assert!(item.images[0].contains("p1"));
        assert!(calls[0].cancel_url.contains("p1"));
        assert!(calls[0].success_url.contains("p1"));
    }

    #[tokio::test]
    async fn test_unknown_product_is_plain_text_200() {
        let gateway = Arc::new(MockGateway::default());
        let server = server_with(STORE, gateway.clone());

        let response = server.get("/checkout/P1").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.text(), "Invalid product!");
        assert!(response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_404_without_legacy_status() {
        let store = format!("{STORE}\n[server]\nlegacy_status_codes = false\n");
        let gateway = Arc::new(MockGateway::default());
        let server = server_with(&store, gateway.clone());

        let response = server.get("/checkout/missing").expect_failure().await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "Invalid product!");
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_is_generic_500() {
        let gateway = Arc::new(MockGateway {
            error: Some("dns error: failed to lookup api.stripe.com"),
            ..Default::default()
        });
        let server = server_with(STORE, gateway.clone());

        let response = server.get("/checkout/p1").expect_failure().await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.text();
        assert_eq!(body, "Stripe error while creating a new session.");
        assert!(!body.contains("dns error"));
        assert_eq!(gateway.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_checkouts_are_independent() {
        let gateway = Arc::new(MockGateway {
            delay: Some(Duration::from_millis(50)),
            ..Default::default()
        });
        let server = server_with(STORE, gateway.clone());

        let (first, second) = tokio::join!(
            server.get("/checkout/p1").into_future(),
            server.get("/checkout/p2").into_future()
        );

        first.assert_status_ok();
        second.assert_status_ok();
        assert!(first.text().contains(r#"sessionId: "cs_test_p1_999_p1""#));
        assert!(second.text().contains(r#"sessionId: "cs_test_p2_100050_p2""#));

        let calls = gateway.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        for call in calls.iter() {
            let id = &call.product_id;
            assert_eq!(call.line_items.len(), 1);
            assert!(call.cancel_url.ends_with(id.as_str()));
            assert!(call.success_url.ends_with(id.as_str()));
            assert!(call.line_items[0].images[0].ends_with(&format!("{id}.png")));
        }
    }
}
