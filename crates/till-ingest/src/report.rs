//! # Sale Reporting
//!
//! Per-sale summary rows and plain-text receipts over an assembled
//! [`SalesGraph`].
//!
//! ## Receipt Layout
//! ```text
//! Sale #sa01
//! Store #s001
//! Date 2024-03-15
//!
//! Customer  Turing, Alan (u002)
//!           7 Oak Ave, Lincoln NE 68508
//! Salesman  Lovelace, Ada (u001)
//!           ada@example.com
//!           12 Main St, Springfield IL 62704
//!
//! Items (2)                                              Tax       Total
//! ----------------------------------------------------------------------
//! Data 10 (c003) Data plan                             $2.75      $50.00
//!     5 GB @ $10.00 / GB
//! Voice 30 (c004) Voice plan 555-0100                  $3.90      $60.00
//!     30 periods @ $2.00 / period
//! ----------------------------------------------------------------------
//! Subtotals                                            $6.65     $110.00
//! Grand total                                                    $116.65
//! ```
//!
//! Summary rows are ordered by descending net price; ties keep the
//! sale-file order.

use std::fmt;

use serde::Serialize;

use till_core::{LineItem, Money, Person, Priced, Sale};

use crate::assembly::SalesGraph;

/// Total character width of the receipt's item table.
const RECEIPT_WIDTH: usize = 70;

// =============================================================================
// Summaries
// =============================================================================

/// One row of the per-sale totals report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleSummary {
    pub sale_code: String,
    pub store_code: String,
    pub item_count: usize,
    pub gross: Money,
    pub tax: Money,
    pub net: Money,
}

/// Sales ordered by descending net price, ties in sale-file order.
pub fn sales_by_net_desc(graph: &SalesGraph) -> Vec<&Sale> {
    let mut sales: Vec<&Sale> = graph.sales.iter().collect();
    // sort_by is stable, so equal nets keep their input positions
    sales.sort_by(|a, b| b.net_price().cmp(&a.net_price()));
    sales
}

/// Builds summary rows for every sale, largest net first.
pub fn summarize(graph: &SalesGraph) -> Vec<SaleSummary> {
    sales_by_net_desc(graph)
        .into_iter()
        .map(|sale| SaleSummary {
            sale_code: sale.code.clone(),
            store_code: sale.store_code.clone(),
            item_count: sale.items.len(),
            gross: sale.gross_price(),
            tax: sale.tax(),
            net: sale.net_price(),
        })
        .collect()
}

// =============================================================================
// Receipt Rendering
// =============================================================================

/// Renders the receipt for one sale, or `None` when the sale code or
/// either of its persons is absent from the graph.
pub fn render_receipt(graph: &SalesGraph, sale_code: &str) -> Option<String> {
    let sale = graph.sale(sale_code)?;
    let customer = graph.persons.get(&sale.customer_uuid)?;
    let salesman = graph.persons.get(&sale.salesman_uuid)?;
    Some(
        Receipt {
            sale,
            customer,
            salesman,
        }
        .to_string(),
    )
}

struct Receipt<'a> {
    sale: &'a Sale,
    customer: &'a Person,
    salesman: &'a Person,
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sale #{}", self.sale.code)?;
        writeln!(f, "Store #{}", self.sale.store_code)?;
        writeln!(f, "Date {}", self.sale.date)?;
        writeln!(f)?;
        write_person(f, "Customer", self.customer)?;
        write_person(f, "Salesman", self.salesman)?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<48} {:>9} {:>11}",
            format!("Items ({})", self.sale.items.len()),
            "Tax",
            "Total"
        )?;
        writeln!(f, "{}", "-".repeat(RECEIPT_WIDTH))?;
        for item in &self.sale.items {
            let (title, detail) = item_lines(item);
            writeln!(
                f,
                "{:<48} {:>9} {:>11}",
                title,
                item.tax().to_string(),
                item.gross_price().to_string()
            )?;
            if !detail.is_empty() {
                writeln!(f, "    {detail}")?;
            }
        }
        writeln!(f, "{}", "-".repeat(RECEIPT_WIDTH))?;
        writeln!(
            f,
            "{:<48} {:>9} {:>11}",
            "Subtotals",
            self.sale.tax().to_string(),
            self.sale.gross_price().to_string()
        )?;
        writeln!(
            f,
            "{:<48} {:>21}",
            "Grand total",
            self.sale.net_price().to_string()
        )
    }
}

fn write_person(f: &mut fmt::Formatter<'_>, role: &str, person: &Person) -> fmt::Result {
    writeln!(f, "{:<9} {} ({})", role, person.full_name(), person.uuid)?;
    if !person.emails.is_empty() {
        writeln!(f, "{:<9} {}", "", person.emails.join(", "))?;
    }
    writeln!(
        f,
        "{:<9} {}, {} {} {}",
        "",
        person.address.street,
        person.address.city,
        person.address.state,
        person.address.zip
    )
}

/// The receipt's title row and optional indented detail row.
fn item_lines(item: &LineItem) -> (String, String) {
    let snapshot = item.item();
    let label = format!("{} ({})", snapshot.name, snapshot.code);
    match item {
        LineItem::Purchase(_) => (
            format!("{label} Purchase"),
            format!("1 @ {}", snapshot.base_price),
        ),
        LineItem::Lease(lease) => (
            format!("{label} Lease for {} months", lease.period_months()),
            String::new(),
        ),
        LineItem::Service(service) => (
            format!("{label} Service by {}", service.employee_uuid),
            format!("{} hours @ {} / hour", service.hours, snapshot.base_price),
        ),
        LineItem::DataPlan(plan) => (
            format!("{label} Data plan"),
            format!("{} GB @ {} / GB", plan.gigabytes, snapshot.base_price),
        ),
        LineItem::VoicePlan(plan) => (
            format!("{label} Voice plan {}", plan.phone_number),
            format!("{} periods @ {} / period", plan.periods, snapshot.base_price),
        ),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use till_core::{
        Address, CatalogItem, DataPlanLine, ItemKind, PurchaseLine, Quantity, ServiceLine, Store,
    };

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn address() -> Address {
        Address::new("12 Main St", "Springfield", "IL", 62704)
    }

    fn purchase_of(item: &CatalogItem) -> LineItem {
        LineItem::Purchase(PurchaseLine::new(item.snapshot()))
    }

    /// Three sales with nets 10.72, 107.15, 107.15 in file order a, b, c.
    fn sample_graph() -> SalesGraph {
        let small =
            CatalogItem::new("c010", ItemKind::Product, "Cable", Money::from_cents(1000)).unwrap();
        let large =
            CatalogItem::new("c020", ItemKind::Product, "Router", Money::from_cents(10000))
                .unwrap();

        let mut persons = HashMap::new();
        for (uuid, first, last) in [("u001", "Ada", "Lovelace"), ("u002", "Alan", "Turing")] {
            let person = Person::new(
                uuid,
                first,
                last,
                address(),
                vec![format!("{first}@example.com").to_lowercase()],
            )
            .unwrap();
            persons.insert(uuid.to_string(), person);
        }
        let mut stores = HashMap::new();
        stores.insert(
            "s001".to_string(),
            Store::new("s001", "u001", address()).unwrap(),
        );

        let mut sale_a = Sale::new("sa-a", "s001", "u002", "u001", date()).unwrap();
        sale_a.add_item(purchase_of(&small));
        let mut sale_b = Sale::new("sa-b", "s001", "u002", "u001", date()).unwrap();
        sale_b.add_item(purchase_of(&large));
        let mut sale_c = Sale::new("sa-c", "s001", "u002", "u001", date()).unwrap();
        sale_c.add_item(purchase_of(&large));

        let mut items = HashMap::new();
        items.insert(small.code.clone(), small);
        items.insert(large.code.clone(), large);

        SalesGraph {
            items,
            persons,
            stores,
            sales: vec![sale_a, sale_b, sale_c],
        }
    }

    #[test]
    fn test_sales_ordered_by_net_descending_stable() {
        let graph = sample_graph();
        let ordered = sales_by_net_desc(&graph);
        let codes: Vec<&str> = ordered.iter().map(|sale| sale.code.as_str()).collect();
        // b and c tie, so they keep their file order ahead of a
        assert_eq!(codes, vec!["sa-b", "sa-c", "sa-a"]);
    }

    #[test]
    fn test_summary_rows_carry_totals() {
        let graph = sample_graph();
        let rows = summarize(&graph);
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].sale_code, "sa-b");
        assert_eq!(rows[0].store_code, "s001");
        assert_eq!(rows[0].item_count, 1);
        assert_eq!(rows[0].gross, Money::from_cents(10000));
        assert_eq!(rows[0].tax, Money::from_cents(715));
        assert_eq!(rows[0].net, Money::from_cents(10715));
        assert_eq!(rows[2].net, Money::from_cents(1072));
    }

    #[test]
    fn test_summary_of_empty_graph_is_empty() {
        let graph = SalesGraph {
            items: HashMap::new(),
            persons: HashMap::new(),
            stores: HashMap::new(),
            sales: Vec::new(),
        };
        assert!(summarize(&graph).is_empty());
    }

    #[test]
    fn test_receipt_header_and_totals() {
        let graph = sample_graph();
        let receipt = render_receipt(&graph, "sa-b").unwrap();

        assert!(receipt.contains("Sale #sa-b"));
        assert!(receipt.contains("Store #s001"));
        assert!(receipt.contains("Date 2024-03-15"));
        assert!(receipt.contains("Customer  Turing, Alan (u002)"));
        assert!(receipt.contains("Salesman  Lovelace, Ada (u001)"));
        assert!(receipt.contains("ada@example.com"));
        assert!(receipt.contains("12 Main St, Springfield IL 62704"));
        assert!(receipt.contains("Router (c020) Purchase"));
        assert!(receipt.contains("    1 @ $100.00"));
        assert!(receipt.lines().any(|line| line.ends_with("$107.15")
            && line.starts_with("Grand total")));
    }

    #[test]
    fn test_receipt_columns_align() {
        let graph = sample_graph();
        let receipt = render_receipt(&graph, "sa-a").unwrap();
        for line in receipt.lines().filter(|line| line.starts_with('-')) {
            assert_eq!(line.len(), RECEIPT_WIDTH);
        }
        let subtotals = receipt
            .lines()
            .find(|line| line.starts_with("Subtotals"))
            .unwrap();
        assert_eq!(subtotals.len(), RECEIPT_WIDTH);
        assert!(subtotals.ends_with("$10.00"));
    }

    #[test]
    fn test_receipt_details_per_variant() {
        let service =
            CatalogItem::new("c030", ItemKind::Service, "Install", Money::from_cents(5000))
                .unwrap();
        let data = CatalogItem::new("c040", ItemKind::DataPlan, "Data 10", Money::from_cents(1000))
            .unwrap();

        let mut graph = sample_graph();
        let mut sale = Sale::new("sa-d", "s001", "u002", "u001", date()).unwrap();
        sale.add_item(LineItem::Service(
            ServiceLine::new(service.snapshot(), Quantity::from_millis(2500), "u001").unwrap(),
        ));
        sale.add_item(LineItem::DataPlan(
            DataPlanLine::new(data.snapshot(), Quantity::from_whole(5)).unwrap(),
        ));
        graph.sales.push(sale);

        let receipt = render_receipt(&graph, "sa-d").unwrap();
        assert!(receipt.contains("Install (c030) Service by u001"));
        assert!(receipt.contains("    2.5 hours @ $50.00 / hour"));
        assert!(receipt.contains("Data 10 (c040) Data plan"));
        assert!(receipt.contains("    5 GB @ $10.00 / GB"));
    }

    #[test]
    fn test_receipt_for_unknown_sale_is_none() {
        assert!(render_receipt(&sample_graph(), "sa-z").is_none());
    }
}
