//! # Store Configuration
//!
//! The store is described by a single TOML file:
//!
//! ```toml
//! stripe_key = "sk_test_..."
//! publishable_key = "pk_test_..."
//! currency = "usd"
//!
//! [[products]]
//! id = "dark-theme"
//! title = "Dark Theme"
//! description = "A dark theme for the dashboard"
//! price = "4.99"
//!
//! [urls]            # optional, defaults shown in `UrlTemplates`
//! [server]          # optional
//! [stripe]          # optional
//! ```
//!
//! `FileConfig` mirrors the file as written. `StoreConfig` is the validated,
//! immutable form shared by every request handler.

use crate::checkout::UrlTemplates;
use crate::error::ConfigError;
use crate::product::{Catalog, Currency, Price, Product};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Root of the config file, before validation
#[derive(Clone, Deserialize)]
pub struct FileConfig {
    pub stripe_key: String,
    pub publishable_key: String,
    pub currency: String,
    #[serde(default)]
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub urls: UrlTemplates,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub stripe: StripeSettings,
}

impl FileConfig {
    /// Read and parse a config file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }
}

impl fmt::Debug for FileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileConfig")
            .field("stripe_key", &"<redacted>")
            .field("publishable_key", &self.publishable_key)
            .field("currency", &self.currency)
            .field("products", &self.products)
            .field("urls", &self.urls)
            .field("server", &self.server)
            .field("stripe", &self.stripe)
            .finish()
    }
}

/// A `[[products]]` entry as written in the file
#[derive(Debug, Clone, Deserialize)]
pub struct ProductEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Major units with two decimals, e.g. "19.99"
    pub price: String,
}

impl TryFrom<ProductEntry> for Product {
    type Error = ConfigError;

    fn try_from(entry: ProductEntry) -> Result<Self, Self::Error> {
        let price =
            Price::parse_major_units(&entry.price).map_err(|source| ConfigError::InvalidPrice {
                product_id: entry.id.clone(),
                source,
            })?;
        Ok(Product::new(entry.id, entry.title, entry.description, price))
    }
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Answer catalog misses with 200 instead of 404
    pub legacy_status_codes: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4242,
            legacy_status_codes: true,
        }
    }
}

/// `[stripe]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StripeSettings {
    /// API base URL (overridden in tests)
    pub api_base_url: String,
    /// Pinned API version. Ad-hoc `line_items[][amount]` needs 2020-08-27 or older.
    pub api_version: String,
    /// Upper bound for one session-creation call
    pub timeout_secs: u64,
}

impl Default for StripeSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2020-08-27".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Processor credentials
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeys {
    /// Secret key (sk_test_..., sk_live_... or a restricted rk_ key)
    pub secret_key: String,
    /// Publishable key handed to the checkout page
    pub publishable_key: String,
}

impl ApiKeys {
    pub fn new(
        secret_key: impl Into<String>,
        publishable_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let secret_key = secret_key.into();
        let publishable_key = publishable_key.into();

        if !secret_key.starts_with("sk_") && !secret_key.starts_with("rk_") {
            return Err(ConfigError::InvalidKey {
                name: "stripe_key",
                reason: "must start with sk_ or rk_".to_string(),
            });
        }
        if !publishable_key.starts_with("pk_") {
            return Err(ConfigError::InvalidKey {
                name: "publishable_key",
                reason: "must start with pk_".to_string(),
            });
        }

        Ok(Self {
            secret_key,
            publishable_key,
        })
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_") || self.secret_key.starts_with("rk_test_")
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys")
            .field("secret_key", &"<redacted>")
            .field("publishable_key", &self.publishable_key)
            .finish()
    }
}

/// Validated store configuration. Immutable once built.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub keys: ApiKeys,
    pub currency: Currency,
    pub catalog: Catalog,
    pub urls: UrlTemplates,
    pub server: ServerSettings,
    pub stripe: StripeSettings,
}

impl StoreConfig {
    /// Read, parse and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        FileConfig::read(path)?.try_into()
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        FileConfig::from_toml(toml_str)?.try_into()
    }
}

impl TryFrom<FileConfig> for StoreConfig {
    type Error = ConfigError;

    fn try_from(file: FileConfig) -> Result<Self, Self::Error> {
        let keys = ApiKeys::new(file.stripe_key, file.publishable_key)?;
        let currency = Currency::parse(&file.currency)?;
        file.urls.validate()?;

        let products = file
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            keys,
            currency,
            catalog: Catalog::new(products),
            urls: file.urls,
            server: file.server,
            stripe: file.stripe,
        })
    }
}
