//! # shop-stripe
//!
//! Stripe gateway for the storefront backend.
//!
//! `StripeCheckoutGateway` creates hosted Checkout Sessions with a single
//! ad-hoc line item per product. It implements `shop_core::CheckoutGateway`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_core::{begin_checkout, StoreConfig};
//! use shop_stripe::{StripeCheckoutGateway, StripeConfig};
//!
//! let store = StoreConfig::load("config.toml")?;
//! let gateway = StripeCheckoutGateway::new(StripeConfig::from_store(&store))?;
//!
//! let session = begin_checkout(&store, &gateway, "dark-theme").await?;
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::{session_form, StripeCheckoutGateway};
pub use config::StripeConfig;
