//! # Store Error Types
//!
//! Error types for gateway operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SalesGraph (already validated by till-ingest)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Gateway checks ← uniqueness across calls, reference resolution        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← names the entity and offending key         │
//! │                                                                         │
//! │  A failed store_graph never leaves partial rows behind.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Gateway operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Storing a graph whose item, person, store, or sale natural key
    ///   was already stored by an earlier call
    #[error("Duplicate {entity}: '{key}' already exists")]
    Duplicate { entity: String, key: String },

    /// A row references an entity the gateway has not stored.
    ///
    /// ## When This Occurs
    /// - A service line's employee uuid missing from the person table
    /// - Hand-built graphs that skipped ingest validation
    #[error("Dangling {entity} reference: '{key}' is not stored")]
    DanglingReference { entity: String, key: String },

    /// Entity not found.
    ///
    /// ## When This Occurs
    /// - Querying line items for a sale code that was never stored
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },
}

impl StoreError {
    /// Creates a Duplicate error.
    pub fn duplicate(entity: impl Into<String>, key: impl Into<String>) -> Self {
        StoreError::Duplicate {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// Creates a DanglingReference error.
    pub fn dangling(entity: impl Into<String>, key: impl Into<String>) -> Self {
        StoreError::DanglingReference {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// Creates a NotFound error.
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }
}

/// Result type for gateway operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
