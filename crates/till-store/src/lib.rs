//! # till-store: Persistence Gateway for Till
//!
//! This crate is where an assembled sales graph goes to be kept. It
//! defines the gateway seam and ships an in-memory reference
//! implementation that flattens the graph into relational rows.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Till Storage Flow                               │
//! │                                                                         │
//! │  till-ingest::ingest(&config) → SalesGraph                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐         ┌─────────────────────────────┐  │   │
//! │  │   │  SalesGateway  │         │       MemoryGateway         │  │   │
//! │  │   │  (gateway.rs)  │◄────────│       (memory.rs)           │  │   │
//! │  │   │                │         │                             │  │   │
//! │  │   │ store_graph    │         │ Address / Person / Email    │  │   │
//! │  │   │ person_id      │         │ Store / Item / Sale         │  │   │
//! │  │   │ sale_id ...    │         │ LineItem row tables         │  │   │
//! │  │   └────────────────┘         └─────────────────────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`gateway`] - The [`SalesGateway`] trait and surrogate [`RecordId`]
//! - [`memory`] - In-memory reference implementation with row tables
//! - [`error`] - Gateway error types
//!
//! ## Usage
//!
//! ```rust
//! use till_ingest::{assemble, split_records, RecordBatches};
//! use till_store::{MemoryGateway, SalesGateway};
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
//! let graph = assemble(&batches).unwrap();
//!
//! let mut gateway = MemoryGateway::new();
//! gateway.store_graph(&graph).unwrap();
//!
//! assert!(gateway.sale_id("sa01").is_some());
//! assert_eq!(gateway.line_item_rows().len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use gateway::{RecordId, SalesGateway};
pub use memory::MemoryGateway;
