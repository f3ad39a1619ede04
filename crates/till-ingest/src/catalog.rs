//! # Catalog Loaders
//!
//! Builders of the keyed lookup maps: items, persons, and stores.
//!
//! ## Loader Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every loader follows the same four rules:                              │
//! │                                                                         │
//! │  1. The first line is a header and is always discarded, even when      │
//! │     it happens to look like data.                                      │
//! │  2. A record with fewer than 2 fields ends the scan; records loaded    │
//! │     so far are kept. The files use a short row as an end sentinel.     │
//! │  3. Any malformed field aborts the load with its 1-based line number.  │
//! │  4. Duplicate natural keys: last write wins.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stores are loaded after persons because a store's manager must
//! resolve against the person map.

use std::collections::HashMap;

use tracing::debug;

use till_core::{Address, CatalogItem, ItemKind, Money, Person, Store};

use crate::error::{IngestError, IngestResult};
use crate::record::Record;

// =============================================================================
// Item Catalog
// =============================================================================

/// Loads the item catalog, keyed by item code.
///
/// Layout: `code,type,name,basePrice` where `type` is one of P/S/D/V.
pub fn load_items(records: &[Record]) -> IngestResult<HashMap<String, CatalogItem>> {
    let mut items = HashMap::new();
    for record in records.iter().skip(1) {
        if record.len() < 2 {
            break;
        }
        record.require(4)?;

        let kind = ItemKind::parse_code(&record.fields[1])
            .ok_or_else(|| IngestError::unknown_item_type(record.line, record.fields[1].as_str()))?;
        let base_price = Money::parse_decimal(&record.fields[3]).ok_or_else(|| {
            IngestError::invalid_field(
                record.line,
                "base price",
                record.fields[3].as_str(),
                "expected a dollar amount with at most 2 decimal places",
            )
        })?;
        let item = CatalogItem::new(
            record.fields[0].as_str(),
            kind,
            record.fields[2].as_str(),
            base_price,
        )
        .map_err(|source| IngestError::core(record.line, source))?;

        items.insert(item.code.clone(), item);
    }
    debug!(count = items.len(), "Loaded item catalog");
    Ok(items)
}

// =============================================================================
// Person Catalog
// =============================================================================

/// Loads persons, keyed by uuid.
///
/// Layout: `uuid,firstName,lastName,street,city,state,zip,email...`
/// where everything from field 7 on is an email address. Empty email
/// fields are kept as written.
pub fn load_persons(records: &[Record]) -> IngestResult<HashMap<String, Person>> {
    let mut persons = HashMap::new();
    for record in records.iter().skip(1) {
        if record.len() < 2 {
            break;
        }
        record.require(7)?;

        let address = parse_address(record, 3)?;
        let emails = record.fields[7..].to_vec();
        let person = Person::new(
            record.fields[0].as_str(),
            record.fields[1].as_str(),
            record.fields[2].as_str(),
            address,
            emails,
        )
        .map_err(|source| IngestError::core(record.line, source))?;

        persons.insert(person.uuid.clone(), person);
    }
    debug!(count = persons.len(), "Loaded person catalog");
    Ok(persons)
}

// =============================================================================
// Store Catalog
// =============================================================================

/// Loads stores, keyed by store code. The manager uuid must already be
/// present in `persons`.
///
/// Layout: `code,managerUuid,street,city,state,zip`
pub fn load_stores(
    records: &[Record],
    persons: &HashMap<String, Person>,
) -> IngestResult<HashMap<String, Store>> {
    let mut stores = HashMap::new();
    for record in records.iter().skip(1) {
        if record.len() < 2 {
            break;
        }
        record.require(6)?;

        let manager_uuid = &record.fields[1];
        if !persons.contains_key(manager_uuid) {
            return Err(IngestError::unknown_person(
                record.line,
                manager_uuid.as_str(),
            ));
        }
        let address = parse_address(record, 2)?;
        let store = Store::new(record.fields[0].as_str(), manager_uuid.as_str(), address)
            .map_err(|source| IngestError::core(record.line, source))?;

        stores.insert(store.code.clone(), store);
    }
    debug!(count = stores.len(), "Loaded store catalog");
    Ok(stores)
}

/// Parses the four address fields starting at `offset`.
///
/// The caller's `require` has already guaranteed the fields exist. The
/// ZIP must be a bare unsigned integer; no trimming is applied.
fn parse_address(record: &Record, offset: usize) -> IngestResult<Address> {
    let zip_text = &record.fields[offset + 3];
    let zip = zip_text.parse::<u32>().map_err(|_| {
        IngestError::invalid_field(
            record.line,
            "zip",
            zip_text.as_str(),
            "expected an unsigned integer",
        )
    })?;
    Ok(Address::new(
        record.fields[offset].as_str(),
        record.fields[offset + 1].as_str(),
        record.fields[offset + 2].as_str(),
        zip,
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================
