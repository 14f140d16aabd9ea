//! # Application State
//!
//! Shared state for the Axum application: the validated store config and
//! the checkout gateway. Both are read-only after startup.

use shop_core::{BoxedCheckoutGateway, FileConfig, StoreConfig};
use shop_stripe::{StripeCheckoutGateway, StripeConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "./config.toml";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Store config (keys, currency, catalog, URL templates)
    pub store: Arc<StoreConfig>,
    /// Payment processor
    pub gateway: BoxedCheckoutGateway,
}

impl AppState {
    pub fn new(store: StoreConfig, gateway: BoxedCheckoutGateway) -> Self {
        Self {
            store: Arc::new(store),
            gateway,
        }
    }

    /// Load the config named by `STORE_CONFIG` (or `./config.toml`), apply
    /// environment overrides and connect the Stripe gateway.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let path = config_path(|key| std::env::var(key).ok());
        let store = load_store(&path, |key| std::env::var(key).ok())
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))?;

        info!(
            "Loaded {} products from {}",
            store.catalog.len(),
            path.display()
        );
        warn_on_catalog_issues(&store);

        let gateway = StripeCheckoutGateway::new(StripeConfig::from_store(&store))
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::new(store, Arc::new(gateway)))
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let server = &self.store.server;
        format!("{}:{}", server.host, server.port)
            .parse()
            .map_err(|e| {
                anyhow::anyhow!(
                    "Invalid listen address {}:{}: {}",
                    server.host,
                    server.port,
                    e
                )
            })
    }

    /// Whether catalog misses answer 200 (existing checkout page) or 404
    pub fn legacy_status_codes(&self) -> bool {
        self.store.server.legacy_status_codes
    }
}

fn config_path(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup("STORE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Read the config file, then let the environment override keys and listener
fn load_store(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<StoreConfig> {
    let mut file = FileConfig::read(path)?;
    apply_env_overrides(&mut file, lookup)?;
    Ok(StoreConfig::try_from(file)?)
}

/// `STRIPE_SECRET_KEY`, `STRIPE_PUBLISHABLE_KEY`, `HOST` and `PORT`
fn apply_env_overrides(
    file: &mut FileConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(key) = lookup("STRIPE_SECRET_KEY") {
        file.stripe_key = key;
    }
    if let Some(key) = lookup("STRIPE_PUBLISHABLE_KEY") {
        file.publishable_key = key;
    }
    if let Some(host) = lookup("HOST") {
        file.server.host = host;
    }
    if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
        file.server.port = port
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a port number, got {:?}", port))?;
    }
    Ok(())
}

fn warn_on_catalog_issues(store: &StoreConfig) {
    if store.catalog.is_empty() {
        warn!("Product catalog is empty, every checkout will be rejected");
    }
    for id in store.catalog.duplicate_ids() {
        warn!("Duplicate product id {:?}, only the first entry is reachable", id);
    }
}
