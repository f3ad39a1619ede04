//! # In-Memory Gateway
//!
//! Reference [`SalesGateway`] that flattens the graph into relational
//! row tables, the shape a SQL-backed gateway would write.
//!
//! ## Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Relational Row Tables                            │
//! │                                                                         │
//! │  Address (id, street, city, state, zip)          ◄── interned by value │
//! │     ▲            ▲                                                      │
//! │     │            │                                                      │
//! │  Person (id, uuid, first, last, address_id)                            │
//! │     ▲  ▲         Store (id, code, manager_id, address_id)              │
//! │     │  │            ▲                                                   │
//! │  Email (id, person_id, email)                                          │
//! │     │  │            │          Item (id, code, name, base_price)       │
//! │     │  │            │             ▲                                     │
//! │  Sale (id, code, store_id, customer_id, salesman_id, date)             │
//! │     ▲                             │                                     │
//! │     │                             │                                     │
//! │  LineItem (id, sale_id, item_id, type_code, ...variant columns)        │
//! │            type P: no extra columns                                    │
//! │            type L: start_date, end_date                                │
//! │            type S: hours, employee_id                                  │
//! │            type D: gigabytes                                           │
//! │            type V: phone_number, periods                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Staged Writes
//! `store_graph` builds the new state on a copy of the tables and swaps
//! it in only when every row landed. An error leaves the gateway exactly
//! as it was before the call.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use till_core::{Address, CatalogItem, LineItem, Money, Person, Quantity, Sale, Store};
use till_ingest::SalesGraph;

use crate::error::{StoreError, StoreResult};
use crate::gateway::{RecordId, SalesGateway};

// =============================================================================
// Row Types
// =============================================================================

/// One interned postal address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressRow {
    pub id: RecordId,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRow {
    pub id: RecordId,
    /// Natural key from the person file.
    pub uuid: String,
    pub first_name: String,
    pub last_name: String,
    pub address_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailRow {
    pub id: RecordId,
    pub person_id: RecordId,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreRow {
    pub id: RecordId,
    /// Natural key from the store file.
    pub code: String,
    pub manager_id: RecordId,
    pub address_id: RecordId,
}

/// One catalog item. The kind is not a column here; it lives on each
/// line-item row as the type discriminator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRow {
    pub id: RecordId,
    /// Natural key from the item file.
    pub code: String,
    pub name: String,
    pub base_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRow {
    pub id: RecordId,
    /// Natural key from the sale file.
    pub code: String,
    pub store_id: RecordId,
    pub customer_id: RecordId,
    pub salesman_id: RecordId,
    pub date: NaiveDate,
}

/// One sold line, all variants in a single table.
///
/// `type_code` is the P/L/S/D/V discriminator; the optional columns are
/// populated per variant as shown in the module-level table layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItemRow {
    pub id: RecordId,
    pub sale_id: RecordId,
    pub item_id: RecordId,
    pub type_code: char,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub hours: Option<Quantity>,
    pub employee_id: Option<RecordId>,
    pub gigabytes: Option<Quantity>,
    pub phone_number: Option<String>,
    pub periods: Option<Quantity>,
}

// =============================================================================
// Table State
// =============================================================================

/// The gateway's whole stored state: row tables plus natural-key
/// indexes. Cloneable so writes can be staged.
#[derive(Debug, Clone, Default)]
struct Tables {
    addresses: Vec<AddressRow>,
    persons: Vec<PersonRow>,
    emails: Vec<EmailRow>,
    stores: Vec<StoreRow>,
    items: Vec<ItemRow>,
    sales: Vec<SaleRow>,
    line_items: Vec<LineItemRow>,

    address_ids: HashMap<Address, RecordId>,
    person_ids: HashMap<String, RecordId>,
    store_ids: HashMap<String, RecordId>,
    item_ids: HashMap<String, RecordId>,
    sale_ids: HashMap<String, RecordId>,
}

impl Tables {
    /// Returns the id of an equal stored address, or stores a new row.
    fn intern_address(&mut self, address: &Address) -> RecordId {
        if let Some(&id) = self.address_ids.get(address) {
            return id;
        }
        let id = RecordId::new();
        self.addresses.push(AddressRow {
            id,
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip: address.zip,
        });
        self.address_ids.insert(address.clone(), id);
        id
    }

    fn insert_person(&mut self, person: &Person) -> StoreResult<()> {
        if self.person_ids.contains_key(&person.uuid) {
            return Err(StoreError::duplicate("person", person.uuid.as_str()));
        }
        let address_id = self.intern_address(&person.address);
        let id = RecordId::new();
        self.persons.push(PersonRow {
            id,
            uuid: person.uuid.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            address_id,
        });
        for email in &person.emails {
            self.emails.push(EmailRow {
                id: RecordId::new(),
                person_id: id,
                email: email.clone(),
            });
        }
        self.person_ids.insert(person.uuid.clone(), id);
        Ok(())
    }

    fn insert_store(&mut self, store: &Store) -> StoreResult<()> {
        if self.store_ids.contains_key(&store.code) {
            return Err(StoreError::duplicate("store", store.code.as_str()));
        }
        let manager_id = self.require_person(&store.manager_uuid)?;
        let address_id = self.intern_address(&store.address);
        let id = RecordId::new();
        self.stores.push(StoreRow {
            id,
            code: store.code.clone(),
            manager_id,
            address_id,
        });
        self.store_ids.insert(store.code.clone(), id);
        Ok(())
    }

    fn insert_item(&mut self, item: &CatalogItem) -> StoreResult<()> {
        if self.item_ids.contains_key(&item.code) {
            return Err(StoreError::duplicate("item", item.code.as_str()));
        }
        let id = RecordId::new();
        self.items.push(ItemRow {
            id,
            code: item.code.clone(),
            name: item.name.clone(),
            base_price: item.base_price,
        });
        self.item_ids.insert(item.code.clone(), id);
        Ok(())
    }

    fn insert_sale(&mut self, sale: &Sale) -> StoreResult<()> {
        if self.sale_ids.contains_key(&sale.code) {
            return Err(StoreError::duplicate("sale", sale.code.as_str()));
        }
        let store_id = self.require_store(&sale.store_code)?;
        let customer_id = self.require_person(&sale.customer_uuid)?;
        let salesman_id = self.require_person(&sale.salesman_uuid)?;
        let id = RecordId::new();
        self.sales.push(SaleRow {
            id,
            code: sale.code.clone(),
            store_id,
            customer_id,
            salesman_id,
            date: sale.date,
        });
        self.sale_ids.insert(sale.code.clone(), id);
        for line in &sale.items {
            let row = self.line_row(id, line)?;
            self.line_items.push(row);
        }
        Ok(())
    }

    /// Flattens one line item into a row, resolving its references.
    fn line_row(&self, sale_id: RecordId, line: &LineItem) -> StoreResult<LineItemRow> {
        let item_id = self.require_item(&line.item().code)?;
        let mut row = LineItemRow {
            id: RecordId::new(),
            sale_id,
            item_id,
            type_code: line.type_code(),
            start_date: None,
            end_date: None,
            hours: None,
            employee_id: None,
            gigabytes: None,
            phone_number: None,
            periods: None,
        };
        match line {
            LineItem::Purchase(_) => {}
            LineItem::Lease(lease) => {
                row.start_date = Some(lease.start_date);
                row.end_date = Some(lease.end_date);
            }
            LineItem::Service(service) => {
                row.hours = Some(service.hours);
                row.employee_id = Some(self.require_person(&service.employee_uuid)?);
            }
            LineItem::DataPlan(plan) => {
                row.gigabytes = Some(plan.gigabytes);
            }
            LineItem::VoicePlan(plan) => {
                row.phone_number = Some(plan.phone_number.clone());
                row.periods = Some(plan.periods);
            }
        }
        Ok(row)
    }

    fn require_person(&self, uuid: &str) -> StoreResult<RecordId> {
        self.person_ids
            .get(uuid)
            .copied()
            .ok_or_else(|| StoreError::dangling("person", uuid))
    }

    fn require_store(&self, code: &str) -> StoreResult<RecordId> {
        self.store_ids
            .get(code)
            .copied()
            .ok_or_else(|| StoreError::dangling("store", code))
    }

    fn require_item(&self, code: &str) -> StoreResult<RecordId> {
        self.item_ids
            .get(code)
            .copied()
            .ok_or_else(|| StoreError::dangling("item", code))
    }
}

// =============================================================================
// Memory Gateway
// =============================================================================

/// In-memory [`SalesGateway`] over plain row vectors.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    tables: Tables,
}

impl MemoryGateway {
    pub fn new() -> Self {
        MemoryGateway::default()
    }

    pub fn address_rows(&self) -> &[AddressRow] {
        &self.tables.addresses
    }

    pub fn person_rows(&self) -> &[PersonRow] {
        &self.tables.persons
    }

    pub fn email_rows(&self) -> &[EmailRow] {
        &self.tables.emails
    }

    pub fn store_rows(&self) -> &[StoreRow] {
        &self.tables.stores
    }

    pub fn item_rows(&self) -> &[ItemRow] {
        &self.tables.items
    }

    pub fn sale_rows(&self) -> &[SaleRow] {
        &self.tables.sales
    }

    pub fn line_item_rows(&self) -> &[LineItemRow] {
        &self.tables.line_items
    }

    /// Line-item rows of one stored sale, in attachment order.
    pub fn line_items_for(&self, sale_code: &str) -> StoreResult<Vec<&LineItemRow>> {
        let sale_id = self
            .tables
            .sale_ids
            .get(sale_code)
            .copied()
            .ok_or_else(|| StoreError::not_found("Sale", sale_code))?;
        Ok(self
            .tables
            .line_items
            .iter()
            .filter(|row| row.sale_id == sale_id)
            .collect())
    }
}

impl SalesGateway for MemoryGateway {
    fn store_graph(&mut self, graph: &SalesGraph) -> StoreResult<()> {
        let mut staged = self.tables.clone();

        // catalog rows land in natural-key order so repeated runs
        // produce identical tables; sales keep their file order
        let mut persons: Vec<&Person> = graph.persons.values().collect();
        persons.sort_by(|a, b| a.uuid.cmp(&b.uuid));
        for person in persons {
            staged.insert_person(person)?;
        }

        let mut stores: Vec<&Store> = graph.stores.values().collect();
        stores.sort_by(|a, b| a.code.cmp(&b.code));
        for store in stores {
            staged.insert_store(store)?;
        }

        let mut items: Vec<&CatalogItem> = graph.items.values().collect();
        items.sort_by(|a, b| a.code.cmp(&b.code));
        for item in items {
            staged.insert_item(item)?;
        }

        for sale in &graph.sales {
            staged.insert_sale(sale)?;
        }

        self.tables = staged;
        info!(
            addresses = self.tables.addresses.len(),
            persons = self.tables.persons.len(),
            stores = self.tables.stores.len(),
            items = self.tables.items.len(),
            sales = self.tables.sales.len(),
            line_items = self.tables.line_items.len(),
            "Stored sales graph"
        );
        Ok(())
    }

    fn person_id(&self, uuid: &str) -> Option<RecordId> {
        self.tables.person_ids.get(uuid).copied()
    }

    fn store_id(&self, code: &str) -> Option<RecordId> {
        self.tables.store_ids.get(code).copied()
    }

    fn item_id(&self, code: &str) -> Option<RecordId> {
        self.tables.item_ids.get(code).copied()
    }

    fn sale_id(&self, code: &str) -> Option<RecordId> {
        self.tables.sale_ids.get(code).copied()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
