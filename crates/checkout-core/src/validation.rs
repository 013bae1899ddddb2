//! # Validation Module
//!
//! Rules a price list file must satisfy before it is fed to the engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: TOML deserialization (serde)                                 │
//! │  ├── Field presence and types                                          │
//! │  └── Negative thresholds impossible (u32)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── SKU format                                                        │
//! │  ├── Non-negative prices, threshold >= 1                               │
//! │  └── No duplicate SKUs per section                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Checkout engine                                              │
//! │  └── Accepts anything; only add_to_cart checks the catalog             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{validate_sku, validate_threshold};
//!
//! assert!(validate_sku("COKE-330").is_ok());
//! assert!(validate_threshold(0).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest SKU a price list may contain.
pub const MAX_SKU_LEN: usize = 50;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_SKU_LEN`] characters
/// - Only ASCII letters, digits, hyphens and underscores
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    if sku.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    // Charset first: once the SKU is ASCII, len() counts characters.
    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only ASCII letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed (free items).
///
/// ```rust
/// use checkout_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("price_cents", 0).is_ok());
/// assert!(validate_price_cents("price_cents", -1).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a bundle threshold (units per bundle).
pub fn validate_threshold(threshold: u32) -> ValidationResult<()> {
    if threshold == 0 {
        return Err(ValidationError::MustBePositive {
            field: "threshold".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Fails on the first SKU that appears twice.
pub fn validate_unique_skus<'a>(skus: impl IntoIterator<Item = &'a str>) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for sku in skus {
        if !seen.insert(sku) {
            return Err(ValidationError::Duplicate {
                field: "sku".to_string(),
                value: sku.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
