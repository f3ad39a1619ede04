//! # till-core: Pure Business Logic for Till
//!
//! This crate is the **heart** of Till. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Flat Data Files (CSV-like)                   │   │
//! │  │    Items ── Persons ── Stores ── Sales ── SaleItems            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 till-ingest (Loading Layer)                     │   │
//! │  │    record splitting, catalog loaders, sale assembly             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ till-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │   Sale    │  │   Money   │  │  Priced   │  │   rules   │  │   │
//! │  │   │ LineItem  │  │ Quantity  │  │  formulas │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 till-store (Persistence Layer)                  │   │
//! │  │              gateway trait, in-memory reference tables          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, Sale, LineItem, etc.)
//! - [`money`] - Money and Quantity types with integer arithmetic (no floating point!)
//! - [`pricing`] - Per-variant gross/tax formulas behind the [`pricing::Priced`] trait
//! - [`error`] - Domain error types
//! - [`validation`] - Entity field validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::money::{Money, Quantity};
//! use till_core::pricing::Priced;
//! use till_core::types::{DataPlanLine, ItemSnapshot};
//!
//! let item = ItemSnapshot {
//!     code: "c001".to_string(),
//!     name: "Data 10GB".to_string(),
//!     base_price: Money::from_cents(1000), // $10.00 per GB
//! };
//!
//! let line = DataPlanLine::new(item, Quantity::from_whole(5)).unwrap();
//!
//! // $10.00 × 5 GB = $50.00 gross, taxed at the data plan rate
//! assert_eq!(line.gross_price().cents(), 5000);
//! assert_eq!(line.tax().cents(), 275);
//! assert_eq!(line.net_price().cents(), 5275);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use till_core::Money` instead of
// `use till_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Quantity};
pub use pricing::Priced;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a natural key (item code, sale code, uuid, store code)
///
/// ## Why a constant?
/// Keys from the data files are short machine-generated codes. A field
/// hundreds of characters long is a shifted record, not a key, and this
/// bound turns that into a validation error instead of a silent join miss.
pub const MAX_KEY_LENGTH: usize = 64;

/// Tax rate for outright product purchases: 7.15%
pub const PRODUCT_TAX: types::TaxRate = types::TaxRate::from_bps(715);

/// Tax rate for hourly services: 3.50%
pub const SERVICE_TAX: types::TaxRate = types::TaxRate::from_bps(350);

/// Tax rate for data plans: 5.50%
pub const DATA_PLAN_TAX: types::TaxRate = types::TaxRate::from_bps(550);

/// Tax rate for voice plans: 6.50%
pub const VOICE_PLAN_TAX: types::TaxRate = types::TaxRate::from_bps(650);
