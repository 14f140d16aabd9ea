//! # shop-core
//!
//! Core types for the storefront checkout backend.
//!
//! This crate provides:
//! - `StoreConfig`, loaded once from `config.toml` and shared read-only
//! - `Product`, `Price` and `Catalog` for the product catalog
//! - `build_session_params` for the hosted checkout line item and URLs
//! - `CheckoutGateway` trait for payment processors
//! - Typed errors for config loading and checkout
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{begin_checkout, StoreConfig};
//!
//! let store = StoreConfig::load("config.toml")?;
//! let session = begin_checkout(&store, gateway.as_ref(), "dark-theme").await?;
//!
//! // Hand session.session_id and session.publishable_key to the checkout page
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod gateway;
pub mod product;

// Re-exports for convenience
pub use checkout::{
    build_session_params, CheckoutSession, LineItem, SessionParams, UrlTemplates,
    CHECKOUT_QUANTITY, PAYMENT_METHOD_TYPES,
};
pub use config::{ApiKeys, FileConfig, ProductEntry, ServerSettings, StoreConfig, StripeSettings};
pub use error::{CheckoutError, CheckoutResult, ConfigError, GatewayError, PriceError};
pub use gateway::{begin_checkout, BoxedCheckoutGateway, CheckoutGateway, SessionRef};
pub use product::{Catalog, Currency, Price, Product};
