//! # Checkout Gateway Trait
//!
//! Seam between the checkout flow and the payment processor.
//! `StripeCheckoutGateway` is the production implementation; tests plug in
//! in-memory gateways.
//!
//! ```text
//! product id ──► Catalog::find ──► build_session_params ──► CheckoutGateway
//!                    │                                          │
//!               ProductNotFound                        SessionRef | GatewayError
//! ```

use crate::checkout::{build_session_params, CheckoutSession, SessionParams};
use crate::config::StoreConfig;
use crate::error::{CheckoutResult, GatewayError};
use async_trait::async_trait;
use std::sync::Arc;

/// Reference to a session created by the processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRef {
    /// Opaque session id
    pub id: String,
    /// Hosted page URL, when the processor returns one
    pub url: Option<String>,
}

/// A payment processor able to create hosted checkout sessions.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Create one session. Implementations make a single attempt.
    async fn create_session(&self, params: &SessionParams) -> Result<SessionRef, GatewayError>;

    /// Provider name for logging
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedCheckoutGateway = Arc<dyn CheckoutGateway>;

/// Resolve `product_id` against the catalog and open a session for it.
///
/// A catalog miss returns before the gateway is called.
pub async fn begin_checkout(
    store: &StoreConfig,
    gateway: &dyn CheckoutGateway,
    product_id: &str,
) -> CheckoutResult<CheckoutSession> {
    let product = store.catalog.find(product_id)?;
    let params = build_session_params(product, store);
    let session = gateway.create_session(&params).await?;

    Ok(CheckoutSession {
        session_id: session.id,
        publishable_key: store.keys.publishable_key.clone(),
    })
}
