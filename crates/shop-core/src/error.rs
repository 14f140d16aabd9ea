//! # Storefront Error Types
//!
//! Typed errors for configuration loading, price parsing and checkout.
//! Configuration errors are fatal at startup; everything else is
//! converted into a response at the handler boundary.

use std::path::PathBuf;
use thiserror::Error;

/// A configured price string could not be turned into minor units
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// No decimal separator (e.g. "19")
    #[error("price {0:?} has no decimal separator")]
    MissingSeparator(String),

    /// Anything other than exactly two fractional digits
    #[error("price {price:?} has {found} fractional digits, expected 2")]
    FractionDigits { price: String, found: usize },

    /// Empty integer part, signs, whitespace or other non-digit characters
    #[error("price {0:?} is not a plain decimal number")]
    NotNumeric(String),

    /// Amount does not fit in the processor's integer type
    #[error("price {0:?} is too large")]
    Overflow(String),
}

/// Errors raised while loading the store configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has the wrong shape
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A product's price failed the minor-unit conversion
    #[error("product {product_id:?}: {source}")]
    InvalidPrice {
        product_id: String,
        #[source]
        source: PriceError,
    },

    /// Currency is not a three-letter code
    #[error("invalid currency code {0:?}, expected three ASCII letters")]
    InvalidCurrency(String),

    /// API key missing or with an unexpected prefix
    #[error("invalid {name}: {reason}")]
    InvalidKey { name: &'static str, reason: String },

    /// URL template without an `{id}` placeholder
    #[error("url template {name} must contain {{id}}: {template:?}")]
    InvalidUrlTemplate { name: &'static str, template: String },
}

/// Errors returned by a checkout gateway (the payment processor call)
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Could not reach the processor
    #[error("network error: {0}")]
    Network(String),

    /// The call exceeded the configured timeout
    #[error("request to {provider} timed out")]
    Timeout { provider: String },

    /// The processor rejected the request
    #[error("provider error [{provider}] (HTTP {status}): {message}")]
    Provider {
        provider: String,
        status: u16,
        message: String,
    },

    /// The processor answered with something we could not decode
    #[error("unexpected response from {provider}: {message}")]
    InvalidResponse { provider: String, message: String },

    /// The gateway could not be constructed
    #[error("gateway setup failed: {0}")]
    Setup(String),
}

/// Per-request checkout failures
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Requested product id is not in the catalog
    #[error("product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Session creation failed at the processor
    #[error("session creation failed: {0}")]
    RemoteSession(#[from] GatewayError),
}

impl CheckoutError {
    /// HTTP status for this error.
    ///
    /// With `legacy_status` a catalog miss answers 200, which is what the
    /// existing checkout page expects.
    pub fn status_code(&self, legacy_status: bool) -> u16 {
        match self {
            CheckoutError::ProductNotFound { .. } if legacy_status => 200,
            CheckoutError::ProductNotFound { .. } => 404,
            CheckoutError::RemoteSession(_) => 500,
        }
    }

    /// Body shown to the buyer. Never includes processor error details.
    pub fn public_message(&self) -> &'static str {
        match self {
            CheckoutError::ProductNotFound { .. } => "Invalid product!",
            CheckoutError::RemoteSession(_) => "Stripe error while creating a new session.",
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let missing = CheckoutError::ProductNotFound {
            product_id: "x".into(),
        };
        assert_eq!(missing.status_code(true), 200);
        assert_eq!(missing.status_code(false), 404);

        let remote = CheckoutError::RemoteSession(GatewayError::Network("reset".into()));
        assert_eq!(remote.status_code(true), 500);
        assert_eq!(remote.status_code(false), 500);
    }

    #[test]
    fn test_public_message_hides_provider_detail() {
        let err = CheckoutError::from(GatewayError::Provider {
            provider: "stripe".into(),
            status: 401,
            message: "Invalid API Key provided: sk_test_****".into(),
        });
        assert!(!err.public_message().contains("sk_test"));
        assert!(err.to_string().contains("Invalid API Key"));
    }

    #[test]
    fn test_config_error_names_product() {
        let err = ConfigError::InvalidPrice {
            product_id: "p1".into(),
            source: PriceError::MissingSeparator("19".into()),
        };
        assert_eq!(
            err.to_string(),
            "product \"p1\": price \"19\" has no decimal separator"
        );
    }
}
