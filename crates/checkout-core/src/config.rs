//! # Price List Configuration
//!
//! Loads the catalog and bundle promotions from a TOML file.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Price List Location Priority                         │
//! │                                                                         │
//! │  1. Explicit path (e.g. --prices on the command line)                  │
//! │  2. Environment variable CHECKOUT_PRICE_LIST                           │
//! │  3. ./pricing.toml                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Format
//! ```toml
//! [[items]]
//! sku = "a"
//! price_cents = 100
//!
//! [[items]]
//! sku = "b"
//! price_cents = 200
//!
//! # "3 of a for 2.00"
//! [[discounts]]
//! sku = "a"
//! threshold = 3
//! bundle_price_cents = 200
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::checkout::Checkout;
use crate::error::{ConfigError, ValidationError};
use crate::money::Money;
use crate::validation::{validate_price_cents, validate_sku, validate_threshold, validate_unique_skus};

/// Environment variable naming the price list file.
pub const PRICE_LIST_ENV: &str = "CHECKOUT_PRICE_LIST";

/// Price list used when nothing else is configured.
pub const DEFAULT_PRICE_LIST_PATH: &str = "pricing.toml";

// =============================================================================
// Entries
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub sku: String,
    pub price_cents: i64,
}

/// A bundle promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountEntry {
    pub sku: String,
    pub threshold: u32,
    pub bundle_price_cents: i64,
}

// =============================================================================
// Price List
// =============================================================================

/// A validated catalog plus its promotions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    #[serde(default)]
    pub items: Vec<PriceEntry>,

    #[serde(default)]
    pub discounts: Vec<DiscountEntry>,
}

impl PriceList {
    /// Parses and validates a TOML price list.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let list: PriceList = toml::from_str(source)?;
        list.validate()?;
        Ok(list)
    }

    /// Reads, parses and validates the price list at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let list = Self::from_toml_str(&source)?;
        info!(
            path = %path.display(),
            items = list.items.len(),
            discounts = list.discounts.len(),
            "Loaded price list"
        );
        Ok(list)
    }

    /// Picks the price list path: `explicit`, then `$CHECKOUT_PRICE_LIST`,
    /// then [`DEFAULT_PRICE_LIST_PATH`].
    pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
        pick_path(explicit, std::env::var(PRICE_LIST_ENV).ok())
    }

    /// Checks every entry. See [`crate::validation`] for the rules.
    ///
    /// Discounts for SKUs with no price are accepted; they are inert in the
    /// engine and only logged here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for item in &self.items {
            validate_sku(&item.sku)?;
            validate_price_cents("price_cents", item.price_cents)?;
        }
        validate_unique_skus(self.items.iter().map(|i| i.sku.as_str()))?;

        for discount in &self.discounts {
            validate_sku(&discount.sku)?;
            validate_threshold(discount.threshold)?;
            validate_price_cents("bundle_price_cents", discount.bundle_price_cents)?;

            if !self.items.iter().any(|i| i.sku == discount.sku) {
                warn!(sku = %discount.sku, "Discount registered for item without a price");
            }
        }
        validate_unique_skus(self.discounts.iter().map(|d| d.sku.as_str()))?;

        Ok(())
    }

    /// Registers every price, then every discount, on `checkout`.
    pub fn apply(&self, checkout: &mut Checkout) {
        for item in &self.items {
            checkout.register_price(item.sku.as_str(), Money::from_cents(item.price_cents));
        }
        for discount in &self.discounts {
            checkout.register_discount(
                discount.sku.as_str(),
                discount.threshold,
                Money::from_cents(discount.bundle_price_cents),
            );
        }
    }
}

fn pick_path(explicit: Option<PathBuf>, from_env: Option<String>) -> PathBuf {
    explicit
        .or_else(|| from_env.filter(|p| !p.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PRICE_LIST_PATH))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[items]]
        sku = "a"
        price_cents = 1

        [[items]]
        sku = "b"
        price_cents = 2

        [[discounts]]
        sku = "a"
        threshold = 3
        bundle_price_cents = 2
    "#;

    #[test]
    fn test_parse_sample() {
        let list = PriceList::from_toml_str(SAMPLE).unwrap();
        assert_eq!(list.items.len(), 2);
        assert_eq!(
            list.discounts,
            vec![DiscountEntry {
                sku: "a".to_string(),
                threshold: 3,
                bundle_price_cents: 2,
            }]
        );
    }

    #[test]
    fn test_sections_are_optional() {
        let list = PriceList::from_toml_str("").unwrap();
        assert_eq!(list, PriceList::default());
    }

    #[test]
    fn test_apply_feeds_engine() {
        let list = PriceList::from_toml_str(SAMPLE).unwrap();
        let mut checkout = Checkout::from_price_list(&list);

        for _ in 0..4 {
            checkout.add_to_cart("a").unwrap();
        }
        checkout.add_to_cart("b").unwrap();
        assert_eq!(checkout.compute_cart_total().cents(), 5);
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = PriceList::from_toml_str("[[items]]\nsku = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_negative_price() {
        let err = PriceList::from_toml_str("[[items]]\nsku = \"a\"\nprice_cents = -5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let source = r#"
            [[discounts]]
            sku = "a"
            threshold = 0
            bundle_price_cents = 2
        "#;
        let err = PriceList::from_toml_str(source).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_items() {
        let source = r#"
            [[items]]
            sku = "a"
            price_cents = 1

            [[items]]
            sku = "a"
            price_cents = 3
        "#;
        let err = PriceList::from_toml_str(source).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_discount_without_price_is_accepted() {
        let source = r#"
            [[discounts]]
            sku = "ghost"
            threshold = 2
            bundle_price_cents = 1
        "#;
        let list = PriceList::from_toml_str(source).unwrap();
        let checkout = Checkout::from_price_list(&list);
        assert!(checkout.discount("ghost").is_some());
        assert_eq!(checkout.unit_price("ghost"), None);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("pricing-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, SAMPLE).unwrap();

        let list = PriceList::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(list, PriceList::from_toml_str(SAMPLE).unwrap());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join(format!("missing-{}.toml", uuid::Uuid::new_v4()));
        let err = PriceList::load(&path).unwrap_err();
        match err {
            ConfigError::Read { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_path_priority() {
        let explicit = Some(PathBuf::from("cli.toml"));
        let env = Some("env.toml".to_string());

        assert_eq!(pick_path(explicit.clone(), env.clone()), PathBuf::from("cli.toml"));
        assert_eq!(pick_path(None, env), PathBuf::from("env.toml"));
        assert_eq!(pick_path(None, Some("  ".to_string())), PathBuf::from(DEFAULT_PRICE_LIST_PATH));
        assert_eq!(pick_path(None, None), PathBuf::from(DEFAULT_PRICE_LIST_PATH));
    }
}
