//! # Stripe Checkout Sessions
//!
//! Creates hosted Checkout Sessions through `POST /v1/checkout/sessions`.
//! Line items are sent ad hoc (name, amount, currency, images) rather than
//! as pre-created Price objects, so the pinned API version must still accept
//! `line_items[][amount]`.

use crate::config::StripeConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shop_core::{CheckoutGateway, GatewayError, SessionParams, SessionRef};
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Stripe Checkout Session gateway
///
/// One attempt per call; the buyer retries by reloading the checkout page.
pub struct StripeCheckoutGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutGateway {
    /// Create a new gateway with the configured timeout
    pub fn new(config: StripeConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Setup(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }
}

/// Form fields for a session-creation request
pub fn session_form(params: &SessionParams) -> Vec<(String, String)> {
    let mut form = vec![
        ("mode".to_string(), "payment".to_string()),
        ("cancel_url".to_string(), params.cancel_url.clone()),
        ("success_url".to_string(), params.success_url.clone()),
    ];

    for (i, method) in params.payment_method_types.iter().enumerate() {
        form.push((format!("payment_method_types[{}]", i), method.clone()));
    }

    for (i, item) in params.line_items.iter().enumerate() {
        form.push((format!("line_items[{}][name]", i), item.name.clone()));
        // Stripe rejects empty strings
        if !item.description.is_empty() {
            form.push((
                format!("line_items[{}][description]", i),
                item.description.clone(),
            ));
        }
        form.push((format!("line_items[{}][amount]", i), item.amount.to_string()));
        form.push((
            format!("line_items[{}][currency]", i),
            item.currency.as_str().to_string(),
        ));
        for (j, image) in item.images.iter().enumerate() {
            form.push((format!("line_items[{}][images][{}]", i, j), image.clone()));
        }
        form.push((
            format!("line_items[{}][quantity]", i),
            item.quantity.to_string(),
        ));
    }

    form
}

#[async_trait]
impl CheckoutGateway for StripeCheckoutGateway {
    #[instrument(skip(self, params), fields(product_id = %params.product_id))]
    async fn create_session(&self, params: &SessionParams) -> Result<SessionRef, GatewayError> {
        let form = session_form(params);

        debug!(
            "Creating Stripe checkout session: {} items, total={}",
            params.line_items.len(),
            params.total()
        );

        let response = self
            .client
            .post(self.config.sessions_url())
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            let message = match serde_json::from_str::<StripeErrorResponse>(&body) {
                Ok(error_response) => error_response.error.describe(),
                Err(_) => format!("HTTP {}: {}", status, body),
            };
            return Err(GatewayError::Provider {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let session: StripeCheckoutSessionResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::InvalidResponse {
                provider: PROVIDER.to_string(),
                message: format!("failed to parse session: {}", e),
            })?;

        info!("Created Stripe checkout session: id={}", session.id);

        Ok(SessionRef {
            id: session.id,
            url: session.url,
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

fn map_transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout {
            provider: PROVIDER.to_string(),
        }
    } else {
        GatewayError::Network(err.to_string())
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl StripeError {
    fn describe(&self) -> String {
        match (&self.error_type, &self.code) {
            (Some(kind), Some(code)) => format!("{} ({}/{})", self.message, kind, code),
            (Some(kind), None) => format!("{} ({})", self.message, kind),
            _ => self.message.clone(),
        }
    }
}
