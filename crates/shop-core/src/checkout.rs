//! # Checkout Session Parameters
//!
//! Turns a catalog product plus store settings into the exact parameters
//! of a hosted checkout session: one line item, fixed quantity, card
//! payments only, and cancel/success/image URLs derived from the product id.

use crate::config::StoreConfig;
use crate::error::ConfigError;
use crate::product::{Currency, Product};
use serde::Deserialize;

/// Quantity of every checkout line item
pub const CHECKOUT_QUANTITY: u32 = 1;

/// Payment method types offered on the hosted page
pub const PAYMENT_METHOD_TYPES: &[&str] = &["card"];

const ID_PLACEHOLDER: &str = "{id}";

/// URL templates for the `[urls]` section. `{id}` is replaced by the product id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UrlTemplates {
    /// Where the buyer lands after cancelling (product detail page)
    pub cancel: String,
    /// Where the buyer lands after paying (plugin settings page)
    pub success: String,
    /// Product image shown on the hosted page
    pub image: String,
}

impl Default for UrlTemplates {
    fn default() -> Self {
        Self {
            cancel: "https://market.nacdlow.com/{id}".to_string(),
            success: "https://app.nacdlow.com/settings/plugins/{id}".to_string(),
            image: "https://market.nacdlow.com/{id}.png".to_string(),
        }
    }
}

impl UrlTemplates {
    /// Every template must reference the product id
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, template) in [
            ("cancel", &self.cancel),
            ("success", &self.success),
            ("image", &self.image),
        ] {
            if !template.contains(ID_PLACEHOLDER) {
                return Err(ConfigError::InvalidUrlTemplate {
                    name,
                    template: template.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn cancel_url(&self, product_id: &str) -> String {
        self.cancel.replace(ID_PLACEHOLDER, product_id)
    }

    pub fn success_url(&self, product_id: &str) -> String {
        self.success.replace(ID_PLACEHOLDER, product_id)
    }

    pub fn image_url(&self, product_id: &str) -> String {
        self.image.replace(ID_PLACEHOLDER, product_id)
    }
}

/// The single line item of a checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub description: String,
    /// Unit amount in minor units
    pub amount: i64,
    pub currency: Currency,
    pub images: Vec<String>,
    pub quantity: u32,
}

/// Everything the processor needs to create a hosted checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    /// Product the session was built for (logging only, not sent)
    pub product_id: String,
    pub line_items: Vec<LineItem>,
    pub payment_method_types: Vec<String>,
    pub cancel_url: String,
    pub success_url: String,
}

impl SessionParams {
    /// Sum of all line items in minor units
    pub fn total(&self) -> i64 {
        self.line_items
            .iter()
            .map(|item| item.amount * i64::from(item.quantity))
            .sum()
    }
}

/// Build session parameters for one product
pub fn build_session_params(product: &Product, store: &StoreConfig) -> SessionParams {
    let line_item = LineItem {
        name: product.title.clone(),
        description: product.description.clone(),
        amount: product.price.minor_units(),
        currency: store.currency.clone(),
        images: vec![store.urls.image_url(&product.id)],
        quantity: CHECKOUT_QUANTITY,
    };

    SessionParams {
        product_id: product.id.clone(),
        line_items: vec![line_item],
        payment_method_types: PAYMENT_METHOD_TYPES.iter().map(|t| t.to_string()).collect(),
        cancel_url: store.urls.cancel_url(&product.id),
        success_url: store.urls.success_url(&product.id),
    }
}

/// A created session, ready for the checkout page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Processor's session id
    pub session_id: String,
    /// Publishable key for the client-side redirect
    pub publishable_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORE: &str = r#"
stripe_key = "sk_test_abc123"
publishable_key = "pk_test_xyz789"
currency = "usd"

[[products]]
id = "p1"
title = "Widget"
description = "A widget"
price = "9.99"
"#;

    #[test]
    fn test_build_single_line_item() {
        let store = StoreConfig::from_toml(STORE).unwrap();
        let product = store.catalog.find("p1").unwrap();

        let params = build_session_params(product, &store);

        assert_eq!(params.product_id, "p1");
        assert_eq!(params.line_items.len(), 1);
        let item = &params.line_items[0];
        assert_eq!(item.name, "Widget");
        assert_eq!(item.description, "A widget");
        assert_eq!(item.amount, 999);
        assert_eq!(item.currency.as_str(), "usd");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.images, vec!["https://market.nacdlow.com/p1.png"]);

        assert_eq!(params.payment_method_types, vec!["card"]);
        assert_eq!(params.cancel_url, "https://market.nacdlow.com/p1");
        assert_eq!(
            params.success_url,
            "https://app.nacdlow.com/settings/plugins/p1"
        );
        assert_eq!(params.total(), 999);
    }

    #[test]
    fn test_custom_templates() {
        let urls = UrlTemplates {
            cancel: "https://shop.test/{id}?cancelled=1".into(),
            success: "https://shop.test/thanks/{id}".into(),
            image: "https://cdn.shop.test/img/{id}.webp".into(),
        };
        assert!(urls.validate().is_ok());
        assert_eq!(urls.cancel_url("x"), "https://shop.test/x?cancelled=1");
        assert_eq!(urls.success_url("x"), "https://shop.test/thanks/x");
        assert_eq!(urls.image_url("x"), "https://cdn.shop.test/img/x.webp");
    }

    #[test]
    fn test_template_without_placeholder() {
        let urls = UrlTemplates {
            success: "https://shop.test/thanks".into(),
            ..UrlTemplates::default()
        };
        assert!(matches!(
            urls.validate(),
            Err(ConfigError::InvalidUrlTemplate { name: "success", .. })
        ));
    }
}
