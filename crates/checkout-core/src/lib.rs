//! # checkout-core: Cart Pricing Engine
//!
//! Prices a shopping cart from per-item unit prices and optional
//! "buy N for a fixed price" bundle rules.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   pricing.toml ──► config::PriceList ──► validation                    │
//! │                          │                                              │
//! │                          │ register_price / register_discount          │
//! │                          ▼                                              │
//! │   scanner ──────► checkout::Checkout ◄──── add_to_cart                 │
//! │                          │                                              │
//! │                          │ compute_cart_total                          │
//! │                          ▼                                              │
//! │                   pricing::line_total  (per SKU, pure)                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`checkout`] - The engine: catalog, discounts, cart, totals
//! - [`pricing`] - `Sku`, `DiscountRule` and the bundle pricing rule
//! - [`money`] - Integer-cents money type
//! - [`config`] - TOML price list loading
//! - [`validation`] - Price list rules
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{Checkout, Money};
//!
//! let mut checkout = Checkout::new();
//! checkout.register_price("a", Money::from_cents(1));
//! checkout.register_price("b", Money::from_cents(2));
//!
//! checkout.add_to_cart("a").unwrap();
//! checkout.add_to_cart("b").unwrap();
//! assert_eq!(checkout.compute_cart_total().cents(), 3);
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod money;
pub mod pricing;
pub mod validation;

pub use checkout::{CartLine, CartTotals, Checkout};
pub use config::PriceList;
pub use error::{CheckoutError, CheckoutResult, ConfigError, ValidationError};
pub use money::Money;
pub use pricing::{DiscountRule, Sku};
