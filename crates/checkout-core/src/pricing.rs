//! # Pricing Types
//!
//! Item identity, bundle discount rules and the per-line pricing rule.
//!
//! ## Bundle Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule: "3 for $2.00", unit price $1.00                                  │
//! │                                                                         │
//! │  qty 2  → below threshold      → 2 × $1.00           = $2.00            │
//! │  qty 3  → 1 bundle             → 1 × $2.00           = $2.00            │
//! │  qty 4  → 1 bundle + 1 single  → $2.00 + 1 × $1.00   = $3.00            │
//! │  qty 7  → 2 bundles + 1 single → 2 × $2.00 + $1.00   = $5.00            │
//! │                                                                         │
//! │  Leftover units never get a pro-rated share of the bundle price.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Sku
// =============================================================================

/// Opaque item identifier (Stock Keeping Unit).
///
/// The engine only compares and hashes it; any string is accepted.
/// Format rules apply to price list files only (see [`crate::validation`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sku(String);

impl Sku {
    pub fn new(sku: impl Into<String>) -> Self {
        Sku(sku.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Sku {
    fn from(sku: &str) -> Self {
        Sku(sku.to_string())
    }
}

impl From<String> for Sku {
    fn from(sku: String) -> Self {
        Sku(sku)
    }
}

impl From<&Sku> for Sku {
    fn from(sku: &Sku) -> Self {
        sku.clone()
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lets maps keyed by `Sku` be queried with a plain `&str`.
impl Borrow<str> for Sku {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Discount Rule
// =============================================================================

/// "Buy `threshold` of this item for `bundle_price` total."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountRule {
    /// Units per bundle.
    pub threshold: u32,

    /// Price of one complete bundle.
    pub bundle_price: Money,
}

impl DiscountRule {
    pub const fn new(threshold: u32, bundle_price: Money) -> Self {
        DiscountRule {
            threshold,
            bundle_price,
        }
    }

    /// Whether `qty` units reach at least one full bundle.
    ///
    /// A zero threshold never applies.
    #[inline]
    pub const fn applies_to(&self, qty: u32) -> bool {
        self.threshold > 0 && qty >= self.threshold
    }
}

// =============================================================================
// Line Total
// =============================================================================

/// Prices `qty` units of one item.
///
/// - no rule, or `qty` below the threshold: `unit_price × qty`
/// - otherwise: `(qty / T) × bundle_price + (qty % T) × unit_price`
///
/// ## Example
/// ```rust
/// use checkout_core::money::Money;
/// use checkout_core::pricing::{line_total, DiscountRule};
///
/// let unit = Money::from_cents(100);
/// let rule = DiscountRule::new(3, Money::from_cents(200));
///
/// assert_eq!(line_total(unit, Some(&rule), 2).cents(), 200);
/// assert_eq!(line_total(unit, Some(&rule), 3).cents(), 200);
/// assert_eq!(line_total(unit, Some(&rule), 4).cents(), 300);
/// ```
pub fn line_total(unit_price: Money, rule: Option<&DiscountRule>, qty: u32) -> Money {
    match rule {
        Some(rule) if rule.applies_to(qty) => {
            let bundles = qty / rule.threshold;
            let remainder = qty % rule.threshold;
            rule.bundle_price * bundles + unit_price * remainder
        }
        _ => unit_price * qty,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
