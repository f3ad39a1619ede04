//! # Validation Module
//!
//! Field validation utilities for Till entities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Record parsing (till-ingest)                                 │
//! │  ├── Field counts per record                                           │
//! │  └── Numeric and date formats                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE: Entity field rules                              │
//! │  ├── Natural keys present and well-formed                              │
//! │  └── Prices and quantities non-negative                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store layer (till-store)                                     │
//! │  ├── Uniqueness of natural keys                                        │
//! │  └── Reference integrity between tables                                │
//! │                                                                         │
//! │  Each layer catches a different class of error                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_natural_key, validate_base_price};
//! use till_core::money::Money;
//!
//! validate_natural_key("item code", "c001").unwrap();
//! validate_base_price(Money::from_cents(1099)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::{Money, Quantity};
use crate::MAX_KEY_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Key Validators
// =============================================================================

/// Validates a natural key (item code, sale code, person uuid, store code).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most `MAX_KEY_LENGTH` characters
/// - Must not contain whitespace
///
/// Keys are matched exactly during the cross-file join, so embedded
/// whitespace almost always means a shifted field, not a real key.
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_natural_key;
///
/// assert!(validate_natural_key("uuid", "ry0-70yv-53rs-0o7641f4odi8").is_ok());
/// assert!(validate_natural_key("uuid", "").is_err());
/// assert!(validate_natural_key("uuid", "has space").is_err());
/// ```
pub fn validate_natural_key(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_KEY_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_KEY_LENGTH,
        });
    }

    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalog base price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional items)
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::validation::validate_base_price;
///
/// assert!(validate_base_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_base_price(Money::zero()).is_ok());
/// assert!(validate_base_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_base_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "base price".to_string(),
        });
    }

    Ok(())
}

/// Validates a sold quantity (hours, gigabytes, periods).
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (a line priced at nothing is odd but not invalid)
pub fn validate_quantity(field: &str, quantity: Quantity) -> ValidationResult<()> {
    if quantity.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_natural_key() {
        // Valid keys
        assert!(validate_natural_key("item code", "c001").is_ok());
        assert!(validate_natural_key("uuid", "ry0-70yv-53rs-0o7641f4odi8").is_ok());
        assert!(validate_natural_key("store code", "s_17").is_ok());

        // Invalid keys
        assert!(validate_natural_key("item code", "").is_err());
        assert!(validate_natural_key("item code", "   ").is_err());
        assert!(validate_natural_key("item code", "has space").is_err());
        assert!(validate_natural_key("item code", &"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_base_price() {
        assert!(validate_base_price(Money::from_cents(0)).is_ok());
        assert!(validate_base_price(Money::from_cents(1099)).is_ok());
        assert!(validate_base_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("hours", Quantity::from_whole(5)).is_ok());
        assert!(validate_quantity("hours", Quantity::zero()).is_ok());
        assert!(validate_quantity("hours", Quantity::from_millis(-1)).is_err());
    }
}
