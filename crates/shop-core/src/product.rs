//! # Product Types
//!
//! Catalog types for the storefront.
//! Products are loaded from `config.toml`; prices are converted to
//! integer minor units once, at load time.

use crate::error::{CheckoutError, CheckoutResult, ConfigError, PriceError};
use std::fmt;

/// ISO 4217 currency code, stored lowercase (e.g. "usd")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(String);

impl Currency {
    /// Parse a three-letter currency code
    pub fn parse(code: &str) -> Result<Self, ConfigError> {
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    /// Returns the lowercase code as sent to the processor
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_uppercase())
    }
}

/// Price in the smallest currency unit (cents for USD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    amount: i64,
}

impl Price {
    /// Create a price from minor units
    pub fn from_minor_units(amount: i64) -> Self {
        Self { amount }
    }

    /// Parse a major-unit price string with exactly two fractional digits.
    ///
    /// The separator is dropped and the remaining digits read as one
    /// integer: `"19.99"` becomes `1999`.
    pub fn parse_major_units(price: &str) -> Result<Self, PriceError> {
        let (whole, fraction) = price
            .split_once('.')
            .ok_or_else(|| PriceError::MissingSeparator(price.to_string()))?;

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(PriceError::NotNumeric(price.to_string()));
        }
        if fraction.len() != 2 {
            return Err(PriceError::FractionDigits {
                price: price.to_string(),
                found: fraction.len(),
            });
        }

        let amount = format!("{whole}{fraction}")
            .parse::<i64>()
            .map_err(|_| PriceError::Overflow(price.to_string()))?;
        Ok(Self { amount })
    }

    /// Amount in minor units
    pub fn minor_units(&self) -> i64 {
        self.amount
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.amount / 100, self.amount % 100)
    }
}

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Public routing key (e.g. "dark-theme")
    pub id: String,

    /// Display name
    pub title: String,

    /// Short description
    pub description: String,

    /// Unit price
    pub price: Price,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            price,
        }
    }
}

/// Ordered product catalog (loaded from config)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Find a product by exact, case-sensitive id. First match wins.
    pub fn find(&self, id: &str) -> CheckoutResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CheckoutError::ProductNotFound {
                product_id: id.to_string(),
            })
    }

    /// Ids that appear more than once, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for product in &self.products {
            if !seen.insert(product.id.as_str()) && !duplicates.contains(&product.id.as_str()) {
                duplicates.push(product.id.as_str());
            }
        }
        duplicates
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
