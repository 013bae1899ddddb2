//! # Checkout Engine
//!
//! One `Checkout` prices one customer's cart.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Operations                                  │
//! │                                                                         │
//! │  Caller                   Operation               State Change          │
//! │  ──────                   ─────────               ────────────          │
//! │                                                                         │
//! │  Catalog loader ─────────► register_price() ────► prices[sku] = p      │
//! │                                                                         │
//! │  Promotions loader ──────► register_discount() ─► discounts[sku] = r   │
//! │                                                                         │
//! │  Scanner ────────────────► add_to_cart() ───────► items[sku] += 1      │
//! │                            (UnknownItem if no price, no change)         │
//! │                                                                         │
//! │  Display ────────────────► compute_cart_total() ► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every SKU in the cart has a price (checked on insert)
//! - Quantities only grow; there is no removal
//! - At most one discount rule per SKU; the last registration wins

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::config::PriceList;
use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::pricing::{line_total, DiscountRule, Sku};

// =============================================================================
// Cart Views
// =============================================================================

/// One priced line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub sku: Sku,
    pub quantity: u32,
    pub unit_price: Money,
    /// Price after bundle discounts.
    pub line_total: Money,
    /// `unit_price × quantity - line_total`
    pub savings: Money,
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct SKUs in the cart.
    pub line_count: u32,
    pub total_quantity: u32,
    /// Sum of `unit_price × quantity`, before bundles.
    pub subtotal: Money,
    pub savings: Money,
    /// Same value as [`Checkout::compute_cart_total`].
    pub total: Money,
}

// =============================================================================
// Checkout
// =============================================================================

/// The cart pricing engine for a single checkout session.
///
/// ## Example
/// ```rust
/// use checkout_core::{Checkout, CheckoutError, Money};
///
/// let mut checkout = Checkout::new();
/// checkout.register_price("a", Money::from_cents(1));
/// checkout.register_discount("a", 3, Money::from_cents(2));
///
/// for _ in 0..4 {
///     checkout.add_to_cart("a")?;
/// }
/// // one bundle of three plus one single unit
/// assert_eq!(checkout.compute_cart_total().cents(), 3);
///
/// assert!(matches!(
///     checkout.add_to_cart("c"),
///     Err(CheckoutError::UnknownItem(_))
/// ));
/// # Ok::<(), CheckoutError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Checkout {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    prices: HashMap<Sku, Money>,
    discounts: HashMap<Sku, DiscountRule>,
    items: HashMap<Sku, u32>,
}

impl Checkout {
    /// Creates an engine with an empty catalog and an empty cart.
    pub fn new() -> Self {
        Checkout {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            prices: HashMap::new(),
            discounts: HashMap::new(),
            items: HashMap::new(),
        }
    }

    /// Creates an engine preloaded with every price and discount in `list`.
    pub fn from_price_list(list: &PriceList) -> Self {
        let mut checkout = Checkout::new();
        list.apply(&mut checkout);
        checkout
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    // -------------------------------------------------------------------------
    // Core operations
    // -------------------------------------------------------------------------

    /// Sets the unit price of `sku`, replacing any previous price.
    ///
    /// Prices are not validated here.
    pub fn register_price(&mut self, sku: impl Into<Sku>, price: Money) {
        let sku = sku.into();
        debug!(session = %self.session_id, sku = %sku, price = %price, "Registering price");
        self.prices.insert(sku, price);
    }

    /// Adds one unit of `sku` to the cart.
    ///
    /// ## Errors
    /// [`CheckoutError::UnknownItem`] if `sku` has no registered price.
    /// The cart is unchanged in that case.
    pub fn add_to_cart(&mut self, sku: impl AsRef<str>) -> CheckoutResult<()> {
        let sku = sku.as_ref();

        let Some((key, _)) = self.prices.get_key_value(sku) else {
            warn!(session = %self.session_id, sku = %sku, "Rejected unknown item");
            return Err(CheckoutError::UnknownItem(Sku::from(sku)));
        };

        let quantity = self.items.entry(key.clone()).or_insert(0);
        *quantity += 1;
        debug!(session = %self.session_id, sku = %sku, quantity = *quantity, "Added to cart");
        Ok(())
    }

    /// Sets the bundle rule for `sku`: `threshold` units cost `bundle_price`.
    ///
    /// The SKU does not need a price yet. A rule for a SKU that never gets
    /// one has no effect, since such a SKU cannot enter the cart.
    pub fn register_discount(&mut self, sku: impl Into<Sku>, threshold: u32, bundle_price: Money) {
        let sku = sku.into();
        debug!(
            session = %self.session_id,
            sku = %sku,
            threshold,
            bundle_price = %bundle_price,
            "Registering discount"
        );
        self.discounts
            .insert(sku, DiscountRule::new(threshold, bundle_price));
    }

    /// Sums the discounted line total of every item in the cart.
    pub fn compute_cart_total(&self) -> Money {
        let total: Money = self
            .items
            .iter()
            .filter_map(|(sku, &qty)| self.item_total(sku, qty))
            .sum();

        debug!(
            session = %self.session_id,
            lines = self.items.len(),
            total = %total,
            "Computed cart total"
        );
        total
    }

    // -------------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------------

    /// Prices `qty` units of `sku` with its discount rule, if any.
    ///
    /// Returns `None` when `sku` has no unit price.
    pub fn item_total(&self, sku: impl AsRef<str>, qty: u32) -> Option<Money> {
        let sku = sku.as_ref();
        let unit_price = *self.prices.get(sku)?;
        Some(line_total(unit_price, self.discounts.get(sku), qty))
    }

    /// Units of `sku` currently in the cart (0 if none).
    pub fn quantity(&self, sku: impl AsRef<str>) -> u32 {
        self.items.get(sku.as_ref()).copied().unwrap_or(0)
    }

    pub fn unit_price(&self, sku: impl AsRef<str>) -> Option<Money> {
        self.prices.get(sku.as_ref()).copied()
    }

    pub fn discount(&self, sku: impl AsRef<str>) -> Option<&DiscountRule> {
        self.discounts.get(sku.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns one priced line per cart item, sorted by SKU.
    pub fn lines(&self) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = self
            .items
            .iter()
            .filter_map(|(sku, &quantity)| {
                let unit_price = *self.prices.get(sku)?;
                let line_total = line_total(unit_price, self.discounts.get(sku), quantity);
                Some(CartLine {
                    sku: sku.clone(),
                    quantity,
                    unit_price,
                    line_total,
                    savings: unit_price * quantity - line_total,
                })
            })
            .collect();

        lines.sort_by(|a, b| a.sku.cmp(&b.sku));
        lines
    }

    /// Summarises the cart for display.
    pub fn totals(&self) -> CartTotals {
        self.lines()
            .iter()
            .fold(CartTotals::default(), |mut totals, line| {
                totals.line_count += 1;
                totals.total_quantity += line.quantity;
                totals.subtotal += line.unit_price * line.quantity;
                totals.savings += line.savings;
                totals.total += line.line_total;
                totals
            })
    }
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Catalog with a = 1, b = 2.
    fn checkout() -> Checkout {
        let mut checkout = Checkout::new();
        checkout.register_price("a", Money::from_cents(1));
        checkout.register_price("b", Money::from_cents(2));
        checkout
    }

    fn add_times(checkout: &mut Checkout, sku: &str, times: u32) {
        for _ in 0..times {
            checkout.add_to_cart(sku).unwrap();
        }
    }

    #[test]
    fn test_can_calculate_total() {
        let mut checkout = checkout();
        checkout.add_to_cart("a").unwrap();
        assert_eq!(checkout.compute_cart_total().cents(), 1);
    }

    #[test]
    fn test_total_with_multiple_items() {
        let mut checkout = checkout();
        checkout.add_to_cart("a").unwrap();
        checkout.add_to_cart("b").unwrap();
        assert_eq!(checkout.compute_cart_total().cents(), 3);
    }

    #[test]
    fn test_can_add_discount_rule() {
        let mut checkout = checkout();
        checkout.register_discount("a", 3, Money::from_cents(2));
        assert_eq!(
            checkout.discount("a"),
            Some(&DiscountRule::new(3, Money::from_cents(2)))
        );
    }

    #[test]
    fn test_can_apply_discount_rule() {
        let mut checkout = checkout();
        checkout.register_discount("a", 3, Money::from_cents(2));
        add_times(&mut checkout, "a", 3);
        assert_eq!(checkout.compute_cart_total().cents(), 2);
    }

    #[test]
    fn test_discount_with_remainder() {
        let mut checkout = checkout();
        checkout.register_discount("a", 3, Money::from_cents(2));
        add_times(&mut checkout, "a", 4);
        assert_eq!(checkout.compute_cart_total().cents(), 3);
    }

    #[test]
    fn test_discount_inactive_below_threshold() {
        let mut checkout = checkout();
        checkout.register_discount("b", 5, Money::from_cents(1));
        add_times(&mut checkout, "b", 4);
        assert_eq!(checkout.compute_cart_total().cents(), 8);
    }

    #[test]
    fn test_unknown_item_is_rejected() {
        let mut checkout = checkout();
        let err = checkout.add_to_cart("c").unwrap_err();
        assert!(matches!(err, CheckoutError::UnknownItem(ref sku) if sku.as_str() == "c"));
        assert!(checkout.is_empty());
        assert_eq!(checkout.compute_cart_total(), Money::zero());
    }

    #[test]
    fn test_unknown_item_leaves_state_unchanged() {
        let mut checkout = checkout();
        checkout.register_discount("a", 2, Money::from_cents(1));
        add_times(&mut checkout, "a", 3);

        let before = checkout.lines();
        assert!(checkout.add_to_cart("zzz").is_err());

        assert_eq!(checkout.lines(), before);
        assert_eq!(checkout.quantity("zzz"), 0);
        assert_eq!(checkout.unit_price("zzz"), None);
        assert_eq!(checkout.discount("zzz"), None);
    }

    #[test]
    fn test_add_accumulates_quantity() {
        let mut checkout = checkout();
        add_times(&mut checkout, "a", 5);
        assert_eq!(checkout.quantity("a"), 5);
        assert_eq!(checkout.quantity("b"), 0);
    }

    #[test]
    fn test_reregistering_price_overwrites() {
        let mut checkout = checkout();
        checkout.register_price("a", Money::from_cents(10));
        checkout.add_to_cart("a").unwrap();
        assert_eq!(checkout.compute_cart_total().cents(), 10);
    }

    #[test]
    fn test_last_discount_wins() {
        let mut checkout = checkout();
        checkout.register_discount("a", 3, Money::from_cents(2));
        checkout.register_discount("a", 2, Money::from_cents(1));
        add_times(&mut checkout, "a", 4);
        assert_eq!(checkout.compute_cart_total().cents(), 2);
    }

    #[test]
    fn test_discount_without_price_is_allowed_but_inert() {
        let mut checkout = checkout();
        checkout.register_discount("ghost", 2, Money::from_cents(1));
        assert!(checkout.discount("ghost").is_some());
        assert!(checkout.add_to_cart("ghost").is_err());
        assert_eq!(checkout.item_total("ghost", 2), None);
    }

    #[test]
    fn test_total_is_sum_of_line_totals() {
        let mut checkout = checkout();
        checkout.register_price("c", Money::from_cents(45));
        checkout.register_discount("a", 3, Money::from_cents(2));
        checkout.register_discount("c", 4, Money::from_cents(150));
        add_times(&mut checkout, "a", 7);
        add_times(&mut checkout, "b", 2);
        add_times(&mut checkout, "c", 9);

        let expected = checkout.item_total("a", 7).unwrap()
            + checkout.item_total("b", 2).unwrap()
            + checkout.item_total("c", 9).unwrap();
        assert_eq!(checkout.compute_cart_total(), expected);
        // a: 2×2 + 1, b: 2×2, c: 2×150 + 45
        assert_eq!(expected.cents(), 5 + 4 + 345);
    }

    #[test]
    fn test_lines_and_totals() {
        let mut checkout = checkout();
        checkout.register_discount("a", 3, Money::from_cents(2));
        add_times(&mut checkout, "b", 1);
        add_times(&mut checkout, "a", 4);

        let lines = checkout.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].sku.as_str(), "a");
        assert_eq!(lines[0].quantity, 4);
        assert_eq!(lines[0].line_total.cents(), 3);
        assert_eq!(lines[0].savings.cents(), 1);
        assert_eq!(lines[1].sku.as_str(), "b");
        assert!(lines[1].savings.is_zero());

        let totals = checkout.totals();
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.subtotal.cents(), 6);
        assert_eq!(totals.savings.cents(), 1);
        assert_eq!(totals.total, checkout.compute_cart_total());
    }

    #[test]
    fn test_empty_cart_totals() {
        let checkout = checkout();
        assert_eq!(checkout.compute_cart_total(), Money::zero());
        assert_eq!(checkout.totals(), CartTotals::default());
        assert!(checkout.lines().is_empty());
    }

    #[test]
    fn test_sessions_are_distinct() {
        let first = Checkout::new();
        let second = Checkout::new();
        assert_ne!(first.session_id(), second.session_id());
        assert!(first.started_at() <= Utc::now());
    }
}
