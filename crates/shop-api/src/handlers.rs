//! # Request Handlers
//!
//! Axum request handlers. Checkout failures never escape as errors: each
//! one becomes a plain-text response here.

use crate::render;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use shop_core::{begin_checkout, CheckoutError};
use tracing::{error, info, instrument};

/// Checkout failure rendered as plain text
pub struct CheckoutFailure {
    pub error: CheckoutError,
    pub legacy_status: bool,
}

impl IntoResponse for CheckoutFailure {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code(self.legacy_status))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, self.error.public_message()).into_response()
    }
}

/// Landing page
pub async fn index() -> Html<&'static str> {
    Html(render::landing_page())
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a checkout session for one product and render the redirect page
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Html<String>, CheckoutFailure> {
    let session = begin_checkout(&state.store, state.gateway.as_ref(), &product_id)
        .await
        .map_err(|e| {
            match &e {
                CheckoutError::ProductNotFound { .. } => {
                    info!("Checkout requested for unknown product")
                }
                CheckoutError::RemoteSession(cause) => error!(
                    "Failed to create new session with {}: {}",
                    state.gateway.provider_name(),
                    cause
                ),
            }
            CheckoutFailure {
                error: e,
                legacy_status: state.legacy_status_codes(),
            }
        })?;

    info!("Created checkout session: {}", session.session_id);

    Ok(Html(render::checkout_page(&session)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::GatewayError;

    #[test]
    fn test_failure_response_status() {
        let legacy = CheckoutFailure {
            error: CheckoutError::ProductNotFound {
                product_id: "x".into(),
            },
            legacy_status: true,
        };
        assert_eq!(legacy.into_response().status(), StatusCode::OK);

        let strict = CheckoutFailure {
            error: CheckoutError::ProductNotFound {
                product_id: "x".into(),
            },
            legacy_status: false,
        };
        assert_eq!(strict.into_response().status(), StatusCode::NOT_FOUND);

        let remote = CheckoutFailure {
            error: CheckoutError::RemoteSession(GatewayError::Network("reset".into())),
            legacy_status: true,
        };
        assert_eq!(
            remote.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
