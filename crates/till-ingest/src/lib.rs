//! # till-ingest: Flat-File Loading for Till
//!
//! This crate turns the five comma-delimited data files into one fully
//! joined, validated [`SalesGraph`], ready for pricing and persistence.
//!
//! ## Ingest Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         till-ingest Pipeline                            │
//! │                                                                         │
//! │   Items.csv ──┐                                                         │
//! │ Persons.csv ──┤   ┌────────┐   ┌─────────┐   ┌──────────┐   ┌────────┐ │
//! │  Stores.csv ──┼──►│ record │──►│ catalog │──►│ assembly │──►│ report │ │
//! │   Sales.csv ──┤   │ split  │   │ loaders │   │  (join)  │   │        │ │
//! │ SaleItems.csv─┘   └────────┘   └─────────┘   └────┬─────┘   └────────┘ │
//! │                                                   │                    │
//! │                                                   ▼                    │
//! │                                              SalesGraph                │
//! │                                     (items, persons, stores, sales)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`record`] - Line splitting and the positional [`Record`] type
//! - [`source`] - Where records come from (text, files) and the batch bundle
//! - [`catalog`] - Loaders for the keyed item/person/store maps
//! - [`assembly`] - Sale loading, line-item attachment, the joined graph
//! - [`report`] - Per-sale summaries and plain-text receipts
//! - [`config`] - Data-file locations, with TOML support
//! - [`error`] - Everything that can go wrong, with 1-based line numbers
//!
//! ## Loading Discipline
//!
//! 1. **Header discarded**: the first line of every file is never data
//! 2. **Short row ends the scan**: fewer than 2 fields means end-of-data
//! 3. **Fail fast**: one malformed field aborts the whole ingest
//! 4. **Last write wins**: duplicate natural keys replace earlier rows
//!
//! ## Example Usage
//!
//! ```rust
//! use till_ingest::{assemble, split_records, RecordBatches};
//!
//! let batches = RecordBatches {
//!     items: split_records("code,type,name,basePrice\nc001,P,Widget,10.00"),
//!     persons: split_records(
//!         "uuid,first,last,street,city,state,zip\n\
//!          u001,Ada,Lovelace,12 Main St,Springfield,IL,62704",
//!     ),
//!     stores: split_records("code,manager,street,city,state,zip\ns001,u001,1 Retail Rd,Springfield,IL,62704"),
//!     sales: split_records("code,store,customer,salesman,date\nsa01,s001,u001,u001,2024-03-15"),
//!     sale_lines: split_records("sale,item\nsa01,c001"),
//! };
//!
//! let graph = assemble(&batches).unwrap();
//! assert_eq!(graph.sales.len(), 1);
//! assert_eq!(graph.sale("sa01").unwrap().items.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assembly;
pub mod catalog;
pub mod config;
pub mod error;
pub mod record;
pub mod report;
pub mod source;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use assembly::{
    assemble, attach_line_items, ingest, load_sales, SalesGraph, SalesLedger,
};
pub use catalog::{load_items, load_persons, load_stores};
pub use config::IngestConfig;
pub use error::{IngestError, IngestResult};
pub use record::{split_records, Record};
pub use report::{render_receipt, sales_by_net_desc, summarize, SaleSummary};
pub use source::{FileSource, RecordBatches, RecordSource, TextSource};
