//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CheckoutError        - What callers of the engine see                 │
//! │  ├── UnknownItem      - add_to_cart on a SKU with no price             │
//! │  └── Config           - wraps ConfigError                              │
//! │                                                                         │
//! │  ConfigError          - Price list loading failures                    │
//! │  ├── Read / Parse                                                      │
//! │  └── Validation       - wraps ValidationError                          │
//! │                                                                         │
//! │  Flow: ValidationError → ConfigError → CheckoutError → caller          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::pricing::Sku;

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors returned by the checkout engine.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The item has no registered unit price.
    ///
    /// ## When This Occurs
    /// - A SKU is scanned that was never loaded into the catalog
    ///
    /// The cart is left exactly as it was before the call.
    #[error("Unknown item: {0}")]
    UnknownItem(Sku),

    /// Price list could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading a price list.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Price list file could not be read.
    #[error("Failed to read price list {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Price list is not valid TOML or has the wrong shape.
    #[error("Failed to parse price list: {0}")]
    Parse(#[from] toml::de::Error),

    /// An entry broke a price list rule.
    #[error("Invalid price list: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors for price list entries.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., SKU with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Amount below zero (zero itself is allowed).
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Same SKU listed twice in one section.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================
