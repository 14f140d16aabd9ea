//! # Stripe Configuration
//!
//! Connection settings for the Stripe API, taken from the store config.

use shop_core::StoreConfig;
use std::fmt;
use std::time::Duration;

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_..., sk_live_... or rk_...)
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version sent as `Stripe-Version`
    pub api_version: String,

    /// Timeout for one API call
    pub timeout: Duration,
}

impl StripeConfig {
    /// Build from the validated store configuration
    pub fn from_store(store: &StoreConfig) -> Self {
        Self {
            secret_key: store.keys.secret_key.clone(),
            api_base_url: store.stripe.api_base_url.trim_end_matches('/').to_string(),
            api_version: store.stripe.api_version.clone(),
            timeout: Duration::from_secs(store.stripe.timeout_secs),
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2020-08-27".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Checkout Sessions endpoint
    pub fn sessions_url(&self) -> String {
        format!("{}/v1/checkout/sessions", self.api_base_url)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_from_store() {
        let store = StoreConfig::from_toml(
            r#"
stripe_key = "sk_test_abc123"
publishable_key = "pk_test_xyz789"
currency = "usd"

[stripe]
api_base_url = "http://localhost:12111/"
timeout_secs = 4
"#,
        )
        .unwrap();

        let config = StripeConfig::from_store(&store);
        assert_eq!(config.sessions_url(), "http://localhost:12111/v1/checkout/sessions");
        assert_eq!(config.api_version, "2020-08-27");
        assert_eq!(config.timeout, Duration::from_secs(4));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = StripeConfig::new("sk_live_supersecret");
        assert!(!format!("{config:?}").contains("supersecret"));
    }
}
