//! # Ingest Error Types
//!
//! Error types for record loading and sale assembly.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  I/O Error (std::io::Error)          CoreError (till-core)             │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  IngestError (this module) ← Adds file path or 1-based line number    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller aborts the run: no partial graph survives a failure            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line numbers count from 1 and include the header line, so they match
//! what an editor shows when the operator opens the offending file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use till_core::CoreError;

/// Record loading and assembly errors.
///
/// Every data error names the 1-based source line it came from.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A record has fewer fields than its layout requires.
    ///
    /// ## When This Occurs
    /// - A line-item row is missing its trailing variant fields
    /// - A truncated or hand-edited line
    #[error("line {line}: expected at least {expected} fields, found {found}")]
    TooFewFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A field failed to parse as its expected type.
    ///
    /// ## When This Occurs
    /// - A price with more than two decimal places
    /// - A non-numeric ZIP code
    /// - A date not in `YYYY-MM-DD` form
    #[error("line {line}: invalid {field} '{value}': {reason}")]
    InvalidField {
        line: usize,
        field: String,
        value: String,
        reason: String,
    },

    /// A catalog record carries a type letter outside P/S/D/V.
    #[error("line {line}: unknown item type '{code}'")]
    UnknownItemType { line: usize, code: String },

    /// A line-item record references a sale absent from the sale file.
    #[error("line {line}: sale '{code}' is not defined")]
    UnknownSale { line: usize, code: String },

    /// A line-item record references an item absent from the catalog.
    #[error("line {line}: item '{code}' is not in the catalog")]
    UnknownItem { line: usize, code: String },

    /// A sale header references a store absent from the store file.
    #[error("line {line}: store '{code}' is not defined")]
    UnknownStore { line: usize, code: String },

    /// A record references a person absent from the person file.
    ///
    /// ## When This Occurs
    /// - A store's manager uuid
    /// - A sale's customer or salesman uuid
    /// - A service line's employee uuid
    #[error("line {line}: person '{uuid}' is not defined")]
    UnknownPerson { line: usize, uuid: String },

    /// A domain rule rejected an otherwise well-formed record.
    #[error("line {line}: {source}")]
    Core { line: usize, source: CoreError },

    /// Reading a data file failed.
    #[error("failed to read {}: {source}", path.display())]
    Source { path: PathBuf, source: io::Error },

    /// The ingest configuration file could not be parsed.
    #[error("invalid ingest configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Serializing or deserializing a sales graph failed.
    #[error("graph serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl IngestError {
    /// Creates a TooFewFields error.
    pub fn too_few_fields(line: usize, expected: usize, found: usize) -> Self {
        IngestError::TooFewFields {
            line,
            expected,
            found,
        }
    }

    /// Creates an InvalidField error.
    pub fn invalid_field(
        line: usize,
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        IngestError::InvalidField {
            line,
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an UnknownItemType error.
    pub fn unknown_item_type(line: usize, code: impl Into<String>) -> Self {
        IngestError::UnknownItemType {
            line,
            code: code.into(),
        }
    }

    /// Creates an UnknownSale error.
    pub fn unknown_sale(line: usize, code: impl Into<String>) -> Self {
        IngestError::UnknownSale {
            line,
            code: code.into(),
        }
    }

    /// Creates an UnknownItem error.
    pub fn unknown_item(line: usize, code: impl Into<String>) -> Self {
        IngestError::UnknownItem {
            line,
            code: code.into(),
        }
    }

    /// Creates an UnknownStore error.
    pub fn unknown_store(line: usize, code: impl Into<String>) -> Self {
        IngestError::UnknownStore {
            line,
            code: code.into(),
        }
    }

    /// Creates an UnknownPerson error.
    pub fn unknown_person(line: usize, uuid: impl Into<String>) -> Self {
        IngestError::UnknownPerson {
            line,
            uuid: uuid.into(),
        }
    }

    /// Wraps a domain error with the line it was raised for.
    pub fn core(line: usize, source: CoreError) -> Self {
        IngestError::Core { line, source }
    }

    /// Wraps an I/O error with the file it was raised for.
    pub fn source(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IngestError::Source {
            path: path.into(),
            source,
        }
    }
}

/// Result type for ingest operations.
pub type IngestResult<T> = Result<T, IngestError>;

// =============================================================================
// Unit Tests
// =============================================================================
