//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │      Sale       │   │     Person      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code (key)     │   │  code (key)     │   │  uuid (key)     │       │
//! │  │  kind (P/S/D/V) │   │  store_code     │   │  name           │       │
//! │  │  name           │   │  customer_uuid  │   │  address        │       │
//! │  │  base_price     │   │  salesman_uuid  │   │  emails         │       │
//! │  └────────┬────────┘   │  date, items    │   └─────────────────┘       │
//! │           │            └────────┬────────┘                              │
//! │           │ snapshot            │                                       │
//! │           ▼                     ▼                                       │
//! │  ┌─────────────────────────────────────────────────────────┐           │
//! │  │  LineItem: Purchase | Lease | Service | DataPlan |      │           │
//! │  │            VoicePlan (each carries an ItemSnapshot)     │           │
//! │  └─────────────────────────────────────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Entities carry the natural keys the data files use (item code, sale
//! code, person uuid, store code). The "uuids" in the person file are
//! arbitrary strings, not RFC 4122, so they stay plain `String`s here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Quantity};
use crate::pricing::whole_months_between;
use crate::validation::{validate_base_price, validate_natural_key, validate_quantity};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 715 bps = 7.15% (the product purchase rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Address
// =============================================================================

/// A postal address shared by persons and stores.
///
/// Compares and hashes by value so the store layer can deduplicate the
/// same street address across owners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    /// ZIP code, numeric as the data files supply it.
    pub zip: u32,
}

impl Address {
    /// Creates an address. Street and city are free-form text, so there
    /// is nothing to validate.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: u32,
    ) -> Self {
        Address {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip,
        }
    }
}

// =============================================================================
// Person
// =============================================================================

/// A person referenced by sales: customer, salesman, or service employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Natural key, an arbitrary string code from the person file.
    pub uuid: String,
    pub first_name: String,
    pub last_name: String,
    pub address: Address,
    /// Email addresses in file order. Empty entries are preserved.
    pub emails: Vec<String>,
}

impl Person {
    /// Creates a person after validating the natural key.
    pub fn new(
        uuid: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: Address,
        emails: Vec<String>,
    ) -> CoreResult<Self> {
        let uuid = uuid.into();
        validate_natural_key("uuid", &uuid)?;
        Ok(Person {
            uuid,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address,
            emails,
        })
    }

    /// "Last, First" as names appear on receipts.
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

// =============================================================================
// Store
// =============================================================================

/// A retail location.
///
/// The manager is a reference into the person catalog; the loader
/// resolves it before the store is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Natural key from the store file.
    pub code: String,
    pub manager_uuid: String,
    pub address: Address,
}

impl Store {
    /// Creates a store after validating the natural key.
    pub fn new(
        code: impl Into<String>,
        manager_uuid: impl Into<String>,
        address: Address,
    ) -> CoreResult<Self> {
        let code = code.into();
        validate_natural_key("store code", &code)?;
        Ok(Store {
            code,
            manager_uuid: manager_uuid.into(),
            address,
        })
    }
}

// =============================================================================
// Item Kind
// =============================================================================

/// Catalog discriminator for the four item families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A physical product, sold outright or leased.
    Product,
    /// Work billed hourly, performed by an employee.
    Service,
    /// A plan billed per gigabyte.
    DataPlan,
    /// A plan billed per period against a phone number.
    VoicePlan,
}

impl ItemKind {
    /// Parses the single-letter discriminator used in the item file.
    ///
    /// Exact match only. Unknown letters are the caller's error to
    /// report, with the line number it alone knows.
    pub fn parse_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(ItemKind::Product),
            "S" => Some(ItemKind::Service),
            "D" => Some(ItemKind::DataPlan),
            "V" => Some(ItemKind::VoicePlan),
            _ => None,
        }
    }

    /// The discriminator letter this kind is written as.
    pub const fn code(&self) -> char {
        match self {
            ItemKind::Product => 'P',
            ItemKind::Service => 'S',
            ItemKind::DataPlan => 'D',
            ItemKind::VoicePlan => 'V',
        }
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A catalog item definition: the template sale lines are derived from.
/// Never carries sale-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Natural key from the item file.
    pub code: String,
    pub kind: ItemKind,
    pub name: String,
    pub base_price: Money,
}

impl CatalogItem {
    /// Creates a catalog item after validating the natural key and that
    /// the base price is not negative.
    pub fn new(
        code: impl Into<String>,
        kind: ItemKind,
        name: impl Into<String>,
        base_price: Money,
    ) -> CoreResult<Self> {
        let code = code.into();
        validate_natural_key("item code", &code)?;
        validate_base_price(base_price)?;
        Ok(CatalogItem {
            code,
            kind,
            name: name.into(),
            base_price,
        })
    }

    /// Freezes the catalog data a sale line needs.
    ///
    /// Sale lines carry a snapshot rather than a reference so a stored
    /// sale stays priceable even if the catalog changes later.
    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            code: self.code.clone(),
            name: self.name.clone(),
            base_price: self.base_price,
        }
    }
}

/// Catalog data frozen onto a sale line at assembly time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub code: String,
    pub name: String,
    pub base_price: Money,
}

// =============================================================================
// Line Item Variants
// =============================================================================

/// An outright product purchase at the catalog base price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub item: ItemSnapshot,
}

impl PurchaseLine {
    pub fn new(item: ItemSnapshot) -> Self {
        PurchaseLine { item }
    }
}

/// A product leased over a date range and billed monthly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseLine {
    pub item: ItemSnapshot,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl LeaseLine {
    /// Creates a lease line.
    ///
    /// The range must span at least one whole month; anything shorter
    /// would amortize the lease over zero months.
    pub fn new(item: ItemSnapshot, start_date: NaiveDate, end_date: NaiveDate) -> CoreResult<Self> {
        if whole_months_between(start_date, end_date) < 1 {
            return Err(CoreError::invalid_lease_period(start_date, end_date));
        }
        Ok(LeaseLine {
            item,
            start_date,
            end_date,
        })
    }
}

/// Hourly service work performed by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLine {
    pub item: ItemSnapshot,
    pub hours: Quantity,
    pub employee_uuid: String,
}

impl ServiceLine {
    pub fn new(
        item: ItemSnapshot,
        hours: Quantity,
        employee_uuid: impl Into<String>,
    ) -> CoreResult<Self> {
        validate_quantity("hours", hours)?;
        let employee_uuid = employee_uuid.into();
        validate_natural_key("employee uuid", &employee_uuid)?;
        Ok(ServiceLine {
            item,
            hours,
            employee_uuid,
        })
    }
}

/// A data plan billed per gigabyte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPlanLine {
    pub item: ItemSnapshot,
    pub gigabytes: Quantity,
}

impl DataPlanLine {
    pub fn new(item: ItemSnapshot, gigabytes: Quantity) -> CoreResult<Self> {
        validate_quantity("gigabytes", gigabytes)?;
        Ok(DataPlanLine { item, gigabytes })
    }
}

/// A voice plan billed per period against a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoicePlanLine {
    pub item: ItemSnapshot,
    /// Free-form, as written in the sale-line file.
    pub phone_number: String,
    pub periods: Quantity,
}

impl VoicePlanLine {
    pub fn new(
        item: ItemSnapshot,
        phone_number: impl Into<String>,
        periods: Quantity,
    ) -> CoreResult<Self> {
        validate_quantity("periods", periods)?;
        Ok(VoicePlanLine {
            item,
            phone_number: phone_number.into(),
            periods,
        })
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One line on a sale.
///
/// A catalog `Product` splits into purchase or lease depending on how
/// the sale line is written; the other kinds map one-to-one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineItem {
    Purchase(PurchaseLine),
    Lease(LeaseLine),
    Service(ServiceLine),
    DataPlan(DataPlanLine),
    VoicePlan(VoicePlanLine),
}

impl LineItem {
    /// The frozen catalog data for this line.
    pub fn item(&self) -> &ItemSnapshot {
        match self {
            LineItem::Purchase(line) => &line.item,
            LineItem::Lease(line) => &line.item,
            LineItem::Service(line) => &line.item,
            LineItem::DataPlan(line) => &line.item,
            LineItem::VoicePlan(line) => &line.item,
        }
    }

    /// Single-letter discriminator for persisted sale lines.
    ///
    /// Purchase and lease split the catalog's `P` into `P` and `L`.
    pub const fn type_code(&self) -> char {
        match self {
            LineItem::Purchase(_) => 'P',
            LineItem::Lease(_) => 'L',
            LineItem::Service(_) => 'S',
            LineItem::DataPlan(_) => 'D',
            LineItem::VoicePlan(_) => 'V',
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale header plus its assembled line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Natural key from the sale file.
    pub code: String,
    pub store_code: String,
    pub customer_uuid: String,
    pub salesman_uuid: String,
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
}

impl Sale {
    /// Creates an empty sale after validating the natural key.
    ///
    /// Line items are attached later, once the line file is joined in.
    pub fn new(
        code: impl Into<String>,
        store_code: impl Into<String>,
        customer_uuid: impl Into<String>,
        salesman_uuid: impl Into<String>,
        date: NaiveDate,
    ) -> CoreResult<Self> {
        let code = code.into();
        validate_natural_key("sale code", &code)?;
        Ok(Sale {
            code,
            store_code: store_code.into(),
            customer_uuid: customer_uuid.into(),
            salesman_uuid: salesman_uuid.into(),
            date,
            items: Vec::new(),
        })
    }

    /// Appends a line item, preserving file order.
    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ItemSnapshot {
        ItemSnapshot {
            code: "c001".to_string(),
            name: "Widget".to_string(),
            base_price: Money::from_cents(1000),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(715);
        assert_eq!(rate.bps(), 715);
        assert!((rate.percentage() - 7.15).abs() < 0.001);
        assert!(TaxRate::zero().is_zero());
    }

    #[test]
    fn test_item_kind_codes() {
        assert_eq!(ItemKind::parse_code("P"), Some(ItemKind::Product));
        assert_eq!(ItemKind::parse_code("S"), Some(ItemKind::Service));
        assert_eq!(ItemKind::parse_code("D"), Some(ItemKind::DataPlan));
        assert_eq!(ItemKind::parse_code("V"), Some(ItemKind::VoicePlan));

        // exact match only
        assert_eq!(ItemKind::parse_code("p"), None);
        assert_eq!(ItemKind::parse_code("X"), None);
        assert_eq!(ItemKind::parse_code(""), None);
        assert_eq!(ItemKind::parse_code("PP"), None);

        assert_eq!(ItemKind::DataPlan.code(), 'D');
    }

    #[test]
    fn test_catalog_item_validation() {
        let ok = CatalogItem::new("c001", ItemKind::Product, "Widget", Money::from_cents(1000));
        assert!(ok.is_ok());

        let blank = CatalogItem::new("", ItemKind::Product, "Widget", Money::from_cents(1000));
        assert!(blank.is_err());

        let negative = CatalogItem::new("c002", ItemKind::Product, "Widget", Money::from_cents(-1));
        assert!(negative.is_err());
    }

    #[test]
    fn test_snapshot_freezes_catalog_fields() {
        let item =
            CatalogItem::new("c001", ItemKind::Service, "Repair", Money::from_cents(5000)).unwrap();
        let snap = item.snapshot();
        assert_eq!(snap.code, "c001");
        assert_eq!(snap.name, "Repair");
        assert_eq!(snap.base_price, Money::from_cents(5000));
    }

    #[test]
    fn test_person_full_name() {
        let person = Person::new(
            "u001",
            "Ada",
            "Lovelace",
            Address::new("12 Main St", "Springfield", "IL", 62704),
            vec!["ada@example.com".to_string(), String::new()],
        )
        .unwrap();
        assert_eq!(person.full_name(), "Lovelace, Ada");
        // empty email entries survive construction untouched
        assert_eq!(person.emails.len(), 2);
    }

    #[test]
    fn test_person_requires_uuid() {
        let result = Person::new(
            "",
            "Ada",
            "Lovelace",
            Address::new("12 Main St", "Springfield", "IL", 62704),
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_store_requires_code() {
        let address = Address::new("1 Retail Rd", "Springfield", "IL", 62704);
        assert!(Store::new("s001", "u001", address.clone()).is_ok());
        assert!(Store::new("  ", "u001", address).is_err());
    }

    #[test]
    fn test_lease_requires_whole_month() {
        let short = LeaseLine::new(snapshot(), date(2024, 1, 15), date(2024, 2, 10));
        assert!(short.is_err());

        let reversed = LeaseLine::new(snapshot(), date(2024, 2, 1), date(2024, 1, 1));
        assert!(reversed.is_err());

        let exact = LeaseLine::new(snapshot(), date(2024, 1, 1), date(2024, 2, 1));
        assert!(exact.is_ok());
    }

    #[test]
    fn test_negative_quantities_rejected() {
        assert!(ServiceLine::new(snapshot(), Quantity::from_millis(-1), "u001").is_err());
        assert!(DataPlanLine::new(snapshot(), Quantity::from_millis(-1)).is_err());
        assert!(VoicePlanLine::new(snapshot(), "555-0101", Quantity::from_millis(-1)).is_err());
    }

    #[test]
    fn test_line_item_type_codes() {
        let purchase = LineItem::Purchase(PurchaseLine::new(snapshot()));
        assert_eq!(purchase.type_code(), 'P');
        assert_eq!(purchase.item().code, "c001");

        let lease = LineItem::Lease(
            LeaseLine::new(snapshot(), date(2024, 1, 1), date(2024, 7, 1)).unwrap(),
        );
        assert_eq!(lease.type_code(), 'L');

        let service = LineItem::Service(
            ServiceLine::new(snapshot(), Quantity::from_whole(2), "u001").unwrap(),
        );
        assert_eq!(service.type_code(), 'S');

        let data = LineItem::DataPlan(
            DataPlanLine::new(snapshot(), Quantity::from_whole(5)).unwrap(),
        );
        assert_eq!(data.type_code(), 'D');

        let voice = LineItem::VoicePlan(
            VoicePlanLine::new(snapshot(), "555-0101", Quantity::from_whole(30)).unwrap(),
        );
        assert_eq!(voice.type_code(), 'V');
    }

    #[test]
    fn test_sale_preserves_item_order() {
        let mut sale = Sale::new("sa01", "s001", "u001", "u002", date(2024, 3, 15)).unwrap();
        sale.add_item(LineItem::Purchase(PurchaseLine::new(snapshot())));
        sale.add_item(LineItem::DataPlan(
            DataPlanLine::new(snapshot(), Quantity::from_whole(5)).unwrap(),
        ));
        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.items[0].type_code(), 'P');
        assert_eq!(sale.items[1].type_code(), 'D');
    }

    #[test]
    fn test_line_item_serializes_with_kind_tag() {
        let line = LineItem::DataPlan(DataPlanLine::new(snapshot(), Quantity::from_whole(5)).unwrap());
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["kind"], "data_plan");
        assert_eq!(json["gigabytes"], 5000);
        assert_eq!(json["item"]["code"], "c001");
    }
}
