//! # Sales Gateway
//!
//! The persistence seam: everything downstream of ingest talks to a
//! [`SalesGateway`], never to a concrete storage engine.
//!
//! ## Gateway Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Gateway Pattern Explained                           │
//! │                                                                         │
//! │  till-ingest assembles a SalesGraph, then hands it over:               │
//! │                                                                         │
//! │       gateway.store_graph(&graph)?                                     │
//! │            │                                                            │
//! │            ▼                                                            │
//! │       SalesGateway (trait)                                             │
//! │       ├── store_graph(&mut self, graph)                                │
//! │       ├── person_id(&self, uuid)   ──┐                                 │
//! │       ├── store_id(&self, code)      │  natural key → RecordId         │
//! │       ├── item_id(&self, code)       │  after a successful store       │
//! │       └── sale_id(&self, code)     ──┘                                 │
//! │            │                                                            │
//! │            ▼                                                            │
//! │       MemoryGateway (reference implementation, see memory.rs)          │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Ingest and pricing never see storage details                        │
//! │  • Easy to test (the in-memory gateway IS the test double)             │
//! │  • A SQL-backed gateway slots in without touching callers              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_ingest::SalesGraph;

use crate::error::StoreResult;

// =============================================================================
// Surrogate Identifiers
// =============================================================================

/// Surrogate identifier for a stored row.
///
/// Minted by the gateway when a row is stored, never derived from the
/// natural key. Two gateways storing the same graph mint different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Mints a fresh random identifier.
    pub fn new() -> Self {
        RecordId(Uuid::new_v4())
    }

    /// Wraps an existing uuid, for gateways that load persisted rows.
    #[inline]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        RecordId(uuid)
    }

    /// Returns the underlying uuid.
    #[inline]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// The Gateway Trait
// =============================================================================

/// Destination for an assembled sales graph.
///
/// `store_graph` is all-or-nothing per call: on error the gateway's
/// observable state is unchanged. After a successful call every natural
/// key in the graph resolves through the lookup methods.
pub trait SalesGateway {
    /// Flattens and stores the whole graph.
    fn store_graph(&mut self, graph: &SalesGraph) -> StoreResult<()>;

    /// Resolves a person uuid to its surrogate id.
    fn person_id(&self, uuid: &str) -> Option<RecordId>;

    /// Resolves a store code to its surrogate id.
    fn store_id(&self, code: &str) -> Option<RecordId>;

    /// Resolves an item code to its surrogate id.
    fn item_id(&self, code: &str) -> Option<RecordId>;

    /// Resolves a sale code to its surrogate id.
    fn sale_id(&self, code: &str) -> Option<RecordId>;
}

// =============================================================================
// Unit Tests
// =============================================================================
