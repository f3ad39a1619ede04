//! # Sale Assembly
//!
//! Joins the five record batches into one in-memory [`SalesGraph`].
//!
//! ## Join Pipeline
//! ```text
//! items.csv ────► load_items ──────────────────────────┐
//! persons.csv ──► load_persons ──┬─────────────────────┤
//! stores.csv ───► load_stores ◄──┘       │             │
//!                      │                 │             │
//! sales.csv ───────────┴──► load_sales ◄─┘             │
//!                                │                     │
//! salelines.csv ─────────────────┴──► attach_line_items┘
//!                                            │
//!                                            ▼
//!                                       SalesGraph
//! ```
//!
//! Referential integrity is enforced at each join: a sale naming an
//! unknown store or person, or a line naming an unknown sale or item,
//! aborts the whole ingest with the offending line number. Partial
//! graphs are never produced.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use till_core::{
    CatalogItem, DataPlanLine, ItemKind, LeaseLine, LineItem, Person, PurchaseLine, Quantity,
    Sale, ServiceLine, Store, VoicePlanLine,
};

use crate::catalog::{load_items, load_persons, load_stores};
use crate::config::IngestConfig;
use crate::error::{IngestError, IngestResult};
use crate::record::Record;
use crate::source::RecordBatches;

// =============================================================================
// Sales Ledger
// =============================================================================

/// Sales in file order with O(1) lookup by sale code.
///
/// The sale-line file references sales by code, so the ledger keeps a
/// code index alongside the ordered list. A duplicate sale code
/// replaces the earlier sale in place, keeping its original position.
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    sales: Vec<Sale>,
    index: HashMap<String, usize>,
}

impl SalesLedger {
    pub fn new() -> Self {
        SalesLedger::default()
    }

    /// Inserts a sale, replacing any earlier sale with the same code.
    pub fn upsert(&mut self, sale: Sale) {
        match self.index.get(&sale.code) {
            Some(&pos) => self.sales[pos] = sale,
            None => {
                self.index.insert(sale.code.clone(), self.sales.len());
                self.sales.push(sale);
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<&Sale> {
        self.index.get(code).map(|&pos| &self.sales[pos])
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut Sale> {
        match self.index.get(code) {
            Some(&pos) => Some(&mut self.sales[pos]),
            None => None,
        }
    }

    /// All sales in the order their codes first appeared.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Consumes the ledger, keeping only the ordered sales.
    pub fn into_sales(self) -> Vec<Sale> {
        self.sales
    }
}

// =============================================================================
// Sale Loading
// =============================================================================

/// Loads sale headers into a ledger.
///
/// Layout: `code,storeCode,customerUuid,salesmanUuid,date`. The store
/// and both persons must already exist in their catalogs.
pub fn load_sales(
    records: &[Record],
    stores: &HashMap<String, Store>,
    persons: &HashMap<String, Person>,
) -> IngestResult<SalesLedger> {
    let mut ledger = SalesLedger::new();
    for record in records.iter().skip(1) {
        if record.len() < 2 {
            break;
        }
        record.require(5)?;

        let store_code = &record.fields[1];
        if !stores.contains_key(store_code) {
            return Err(IngestError::unknown_store(record.line, store_code.as_str()));
        }
        let customer_uuid = &record.fields[2];
        if !persons.contains_key(customer_uuid) {
            return Err(IngestError::unknown_person(
                record.line,
                customer_uuid.as_str(),
            ));
        }
        let salesman_uuid = &record.fields[3];
        if !persons.contains_key(salesman_uuid) {
            return Err(IngestError::unknown_person(
                record.line,
                salesman_uuid.as_str(),
            ));
        }
        let date = parse_date(record, 4, "date")?;

        let sale = Sale::new(
            record.fields[0].as_str(),
            store_code.as_str(),
            customer_uuid.as_str(),
            salesman_uuid.as_str(),
            date,
        )
        .map_err(|source| IngestError::core(record.line, source))?;
        ledger.upsert(sale);
    }
    debug!(count = ledger.len(), "Loaded sales");
    Ok(ledger)
}

// =============================================================================
// Line Item Attachment
// =============================================================================

/// Attaches every sale-line record to its sale and returns the ledger.
///
/// Each row starts with `saleCode,itemCode`; the remaining fields
/// depend on the catalog item's kind. The sale is resolved before the
/// item, so a row that is wrong on both counts reports the sale.
pub fn attach_line_items(
    mut ledger: SalesLedger,
    items: &HashMap<String, CatalogItem>,
    persons: &HashMap<String, Person>,
    records: &[Record],
) -> IngestResult<SalesLedger> {
    let mut attached = 0usize;
    for record in records.iter().skip(1) {
        if record.len() < 2 {
            break;
        }

        let sale_code = &record.fields[0];
        let sale = ledger
            .get_mut(sale_code)
            .ok_or_else(|| IngestError::unknown_sale(record.line, sale_code.as_str()))?;
        let item = items
            .get(&record.fields[1])
            .ok_or_else(|| IngestError::unknown_item(record.line, record.fields[1].as_str()))?;

        let line = build_line_item(record, item, persons)?;
        sale.add_item(line);
        attached += 1;
    }
    debug!(count = attached, "Attached line items");
    Ok(ledger)
}

/// Builds the line-item variant that matches the catalog item's kind.
///
/// A product row with exactly two fields is an outright purchase; with
/// more it is a lease carrying a start and end date.
fn build_line_item(
    record: &Record,
    item: &CatalogItem,
    persons: &HashMap<String, Person>,
) -> IngestResult<LineItem> {
    let snapshot = item.snapshot();
    let line = match item.kind {
        ItemKind::Product => {
            if record.len() == 2 {
                LineItem::Purchase(PurchaseLine::new(snapshot))
            } else {
                record.require(4)?;
                let start = parse_date(record, 2, "start date")?;
                let end = parse_date(record, 3, "end date")?;
                let lease = LeaseLine::new(snapshot, start, end)
                    .map_err(|source| IngestError::core(record.line, source))?;
                LineItem::Lease(lease)
            }
        }
        ItemKind::Service => {
            record.require(4)?;
            let hours = parse_quantity(record, 2, "hours")?;
            let employee_uuid = &record.fields[3];
            if !persons.contains_key(employee_uuid) {
                return Err(IngestError::unknown_person(
                    record.line,
                    employee_uuid.as_str(),
                ));
            }
            let service = ServiceLine::new(snapshot, hours, employee_uuid.as_str())
                .map_err(|source| IngestError::core(record.line, source))?;
            LineItem::Service(service)
        }
        ItemKind::DataPlan => {
            record.require(3)?;
            let gigabytes = parse_quantity(record, 2, "gigabytes")?;
            let plan = DataPlanLine::new(snapshot, gigabytes)
                .map_err(|source| IngestError::core(record.line, source))?;
            LineItem::DataPlan(plan)
        }
        ItemKind::VoicePlan => {
            record.require(4)?;
            let periods = parse_quantity(record, 3, "periods")?;
            let plan = VoicePlanLine::new(snapshot, record.fields[2].as_str(), periods)
                .map_err(|source| IngestError::core(record.line, source))?;
            LineItem::VoicePlan(plan)
        }
    };
    Ok(line)
}

fn parse_date(record: &Record, index: usize, field: &str) -> IngestResult<NaiveDate> {
    let text = &record.fields[index];
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| {
        IngestError::invalid_field(
            record.line,
            field,
            text.as_str(),
            "expected an ISO date (yyyy-mm-dd)",
        )
    })
}

fn parse_quantity(record: &Record, index: usize, field: &str) -> IngestResult<Quantity> {
    let text = &record.fields[index];
    Quantity::parse_decimal(text).ok_or_else(|| {
        IngestError::invalid_field(
            record.line,
            field,
            text.as_str(),
            "expected a number with at most 3 decimal places",
        )
    })
}

// =============================================================================
// Sales Graph
// =============================================================================

/// The fully joined in-memory data set.
///
/// Catalogs are keyed by natural key; sales keep the order their codes
/// first appeared in the sale file. Every reference inside the graph
/// resolved during assembly, so downstream consumers can index the maps
/// without re-checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesGraph {
    pub items: HashMap<String, CatalogItem>,
    pub persons: HashMap<String, Person>,
    pub stores: HashMap<String, Store>,
    pub sales: Vec<Sale>,
}

impl SalesGraph {
    /// Looks up a sale by code.
    pub fn sale(&self, code: &str) -> Option<&Sale> {
        self.sales.iter().find(|sale| sale.code == code)
    }

    /// Serializes the graph as pretty-printed JSON.
    pub fn to_json(&self) -> IngestResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a graph previously written by [`SalesGraph::to_json`].
    pub fn from_json(text: &str) -> IngestResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Assembles a graph from already-split record batches.
pub fn assemble(batches: &RecordBatches) -> IngestResult<SalesGraph> {
    let items = load_items(&batches.items)?;
    let persons = load_persons(&batches.persons)?;
    let stores = load_stores(&batches.stores, &persons)?;
    let ledger = load_sales(&batches.sales, &stores, &persons)?;
    let ledger = attach_line_items(ledger, &items, &persons, &batches.sale_lines)?;

    let graph = SalesGraph {
        items,
        persons,
        stores,
        sales: ledger.into_sales(),
    };
    info!(
        items = graph.items.len(),
        persons = graph.persons.len(),
        stores = graph.stores.len(),
        sales = graph.sales.len(),
        "Assembled sales graph"
    );
    Ok(graph)
}

/// Reads every configured file and assembles the graph.
pub fn ingest(config: &IngestConfig) -> IngestResult<SalesGraph> {
    let batches = RecordBatches::load(config)?;
    assemble(&batches)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::split_records;
    use till_core::{Money, Priced};

    const ITEMS: &str = "\
code,type,name,basePrice
c001,P,Router,120.00
c002,S,Install,50.00
c003,D,Data 10,10.00
c004,V,Voice 30,2.00";

    const PERSONS: &str = "\
uuid,first,last,street,city,state,zip
u001,Ada,Lovelace,12 Main St,Springfield,IL,62704,ada@example.com
u002,Alan,Turing,7 Oak Ave,Lincoln,NE,68508";

    const STORES: &str = "\
code,manager,street,city,state,zip
s001,u001,1 Retail Rd,Springfield,IL,62704";

    const SALES: &str = "\
code,store,customer,salesman,date
sa01,s001,u002,u001,2024-03-15";

    const SALE_LINES: &str = "\
sale,item
sa01,c003,5
sa01,c004,555-0100,30";

    fn batches() -> RecordBatches {
        RecordBatches {
            items: split_records(ITEMS),
            persons: split_records(PERSONS),
            stores: split_records(STORES),
            sales: split_records(SALES),
            sale_lines: split_records(SALE_LINES),
        }
    }

    #[test]
    fn test_assemble_builds_graph() {
        let graph = assemble(&batches()).unwrap();
        assert_eq!(graph.items.len(), 4);
        assert_eq!(graph.persons.len(), 2);
        assert_eq!(graph.stores.len(), 1);
        assert_eq!(graph.sales.len(), 1);

        let sale = graph.sale("sa01").unwrap();
        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.store_code, "s001");
    }

    #[test]
    fn test_sale_totals_match_line_items() {
        // 5 GB at $10.00/GB taxed 5.5%, 30 periods at $2.00 taxed 6.5%
        let graph = assemble(&batches()).unwrap();
        let sale = graph.sale("sa01").unwrap();
        assert_eq!(sale.gross_price(), Money::from_cents(11000));
        assert_eq!(sale.tax(), Money::from_cents(665));
        assert_eq!(sale.net_price(), Money::from_cents(11665));
    }

    #[test]
    fn test_unknown_sale_code_fails_fast() {
        let mut batches = batches();
        batches.sale_lines = split_records("sale,item\nsa99,c003,5");
        let err = assemble(&batches).unwrap_err();
        assert_eq!(err.to_string(), "line 2: sale 'sa99' is not defined");
    }

    #[test]
    fn test_sale_resolved_before_item() {
        let mut batches = batches();
        batches.sale_lines = split_records("sale,item\nsa99,c999,5");
        let err = assemble(&batches).unwrap_err();
        assert!(matches!(err, IngestError::UnknownSale { line: 2, .. }));
    }

    #[test]
    fn test_unknown_item_fails_fast() {
        let mut batches = batches();
        batches.sale_lines = split_records("sale,item\nsa01,c999,5");
        let err = assemble(&batches).unwrap_err();
        assert_eq!(err.to_string(), "line 2: item 'c999' is not in the catalog");
    }

    #[test]
    fn test_sale_with_unknown_store_aborts() {
        let mut batches = batches();
        batches.sales = split_records("header\nsa01,s999,u002,u001,2024-03-15");
        let err = assemble(&batches).unwrap_err();
        assert_eq!(err.to_string(), "line 2: store 's999' is not defined");
    }

    #[test]
    fn test_duplicate_sale_replaced_in_place() {
        let mut batches = batches();
        batches.sales = split_records(
            "header\n\
             sa01,s001,u002,u001,2024-03-15\n\
             sa02,s001,u001,u002,2024-04-01\n\
             sa01,s001,u001,u001,2024-05-20",
        );
        batches.sale_lines = split_records("sale,item");
        let graph = assemble(&batches).unwrap();

        assert_eq!(graph.sales.len(), 2);
        // the replacement keeps the first sa01's position
        assert_eq!(graph.sales[0].code, "sa01");
        assert_eq!(graph.sales[0].salesman_uuid, "u001");
        assert_eq!(graph.sales[0].date.to_string(), "2024-05-20");
        assert_eq!(graph.sales[1].code, "sa02");
    }

    #[test]
    fn test_product_row_width_selects_purchase_or_lease() {
        let mut batches = batches();
        batches.sale_lines = split_records(
            "sale,item\n\
             sa01,c001\n\
             sa01,c001,2024-01-01,2024-07-01",
        );
        let graph = assemble(&batches).unwrap();
        let sale = graph.sale("sa01").unwrap();

        assert!(matches!(sale.items[0], LineItem::Purchase(_)));
        match &sale.items[1] {
            LineItem::Lease(lease) => {
                assert_eq!(lease.period_months(), 6);
                assert_eq!(lease.gross_price(), Money::from_cents(3000));
            }
            other => panic!("expected a lease, got {other:?}"),
        }
    }

    #[test]
    fn test_short_lease_aborts_with_line() {
        let mut batches = batches();
        batches.sale_lines = split_records("sale,item\nsa01,c001,2024-01-15,2024-02-10");
        let err = assemble(&batches).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2: lease from 2024-01-15 to 2024-02-10 does not span a whole month"
        );
    }

    #[test]
    fn test_service_employee_must_be_known() {
        let mut batches = batches();
        batches.sale_lines = split_records("sale,item\nsa01,c002,2.5,u999");
        let err = assemble(&batches).unwrap_err();
        assert_eq!(err.to_string(), "line 2: person 'u999' is not defined");
    }

    #[test]
    fn test_bad_date_reports_field_name() {
        let mut batches = batches();
        batches.sales = split_records("header\nsa01,s001,u002,u001,03/15/2024");
        let err = assemble(&batches).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2: invalid date '03/15/2024': expected an ISO date (yyyy-mm-dd)"
        );
    }

    #[test]
    fn test_sales_without_lines_are_kept() {
        let mut batches = batches();
        batches.sale_lines = split_records("sale,item");
        let graph = assemble(&batches).unwrap();
        assert_eq!(graph.sales.len(), 1);
        assert!(graph.sale("sa01").unwrap().items.is_empty());
    }

    #[test]
    fn test_graph_json_round_trip() {
        let graph = assemble(&batches()).unwrap();
        let json = graph.to_json().unwrap();
        let restored = SalesGraph::from_json(&json).unwrap();
        assert_eq!(restored, graph);
    }

    #[test]
    fn test_ingest_reads_files_from_disk() {
        let dir = std::env::temp_dir().join("till_ingest_end_to_end");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Items.csv"), ITEMS).unwrap();
        std::fs::write(dir.join("Persons.csv"), PERSONS).unwrap();
        std::fs::write(dir.join("Stores.csv"), STORES).unwrap();
        std::fs::write(dir.join("Sales.csv"), SALES).unwrap();
        std::fs::write(dir.join("SaleItems.csv"), SALE_LINES).unwrap();

        let config = IngestConfig::from_data_dir(&dir);
        let graph = ingest(&config).unwrap();
        assert_eq!(graph.sales.len(), 1);
        assert_eq!(graph.sale("sa01").unwrap().items.len(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }
}
