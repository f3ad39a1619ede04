//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Field validation failures                      │
//! │                                                                         │
//! │  till-ingest errors (separate crate)                                   │
//! │  └── IngestError      - Record parsing and join failures               │
//! │                                                                         │
//! │  till-store errors (separate crate)                                    │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → IngestError (gains line context)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field names, codes, dates)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// The ingest layer catches them and attaches the offending line number.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A lease date range amortizes over zero or negative months.
    ///
    /// ## When This Occurs
    /// - The end date precedes the start date
    /// - The range is shorter than one whole month (day-of-month
    ///   remainders truncate, so Jan 15 → Feb 10 counts as 0 months)
    ///
    /// The first-month price divides by the month count, so such a
    /// range can never be priced.
    #[error("lease from {start} to {end} does not span a whole month")]
    InvalidLeasePeriod { start: NaiveDate, end: NaiveDate },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidLeasePeriod error.
    pub fn invalid_lease_period(start: NaiveDate, end: NaiveDate) -> Self {
        CoreError::InvalidLeasePeriod { start, end }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
///
/// These errors occur when a field on an entity under construction
/// doesn't meet requirements. Raised before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., embedded whitespace in a key).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lease_period_message() {
        let err = CoreError::invalid_lease_period(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert_eq!(
            err.to_string(),
            "lease from 2024-02-01 to 2024-01-01 does not span a whole month"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "item code".to_string(),
        };
        assert_eq!(err.to_string(), "item code is required");

        let err = ValidationError::MustBeNonNegative {
            field: "base price".to_string(),
        };
        assert_eq!(err.to_string(), "base price must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "uuid".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
