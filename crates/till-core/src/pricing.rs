//! # Pricing Module
//!
//! Gross price, tax, and net total formulas for every line item variant.
//!
//! ## Pricing Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Variant     Gross Price                        Tax                     │
//! │  ─────────   ──────────────────────────────     ────────────────────    │
//! │  Purchase    basePrice                          gross × 7.15%           │
//! │  Lease       (basePrice + markup) ÷ months      0 (folded into markup)  │
//! │  Service     basePrice × hours                  gross × 3.50%           │
//! │  DataPlan    basePrice × gigabytes              gross × 5.50%           │
//! │  VoicePlan   basePrice × periods                gross × 6.50%           │
//! │                                                                         │
//! │  markup = basePrice ÷ 2, rounded to the cent                           │
//! │  months = whole months in the lease range, day remainders truncated    │
//! │                                                                         │
//! │  Every formula rounds half-up to the cent at its own boundary, so a    │
//! │  sale total is a plain cent sum with no re-rounding.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A lease's gross price is one month's amortized payment, not the
//! lease's total value.

use chrono::{Datelike, NaiveDate};

use crate::money::Money;
use crate::types::{
    DataPlanLine, LeaseLine, LineItem, PurchaseLine, Sale, ServiceLine, VoicePlanLine,
};
use crate::{DATA_PLAN_TAX, PRODUCT_TAX, SERVICE_TAX, VOICE_PLAN_TAX};

// =============================================================================
// Calendar Math
// =============================================================================

/// Whole months from `start` to `end`, truncating day-of-month remainders.
///
/// `2024-01-31 → 2024-02-29` is 0 months; `2024-01-31 → 2024-03-01` is 1.
/// Negative when `end` precedes `start`.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = (end.year() as i64 - start.year() as i64) * 12
        + (end.month() as i64 - start.month() as i64);
    if end.day() < start.day() {
        months -= 1;
    }
    months
}

// =============================================================================
// Priced Trait
// =============================================================================

/// Anything that contributes a gross amount and a tax amount to a sale.
///
/// Implemented by each line item variant, by [`LineItem`] as a dispatching
/// wrapper, and by [`Sale`] as the sum over its lines.
pub trait Priced {
    /// The pre-tax amount in cents.
    fn gross_price(&self) -> Money;

    /// The tax charged on this amount, rounded half-up to the cent.
    fn tax(&self) -> Money;

    /// Gross plus tax. Both operands are cent-exact, so the sum is too.
    fn net_price(&self) -> Money {
        self.gross_price() + self.tax()
    }
}

// =============================================================================
// Lease Helpers
// =============================================================================

impl LeaseLine {
    /// Whole months in the lease range. At least 1 by construction.
    pub fn period_months(&self) -> i64 {
        whole_months_between(self.start_date, self.end_date)
    }

    /// Half the base price, rounded to the cent.
    pub fn markup(&self) -> Money {
        self.item.base_price.divide_rounded(2)
    }

    /// Base price plus markup: the value amortized over the period.
    pub fn total_lease_price(&self) -> Money {
        self.item.base_price + self.markup()
    }
}

// =============================================================================
// Variant Pricing
// =============================================================================

impl Priced for PurchaseLine {
    fn gross_price(&self) -> Money {
        self.item.base_price
    }

    fn tax(&self) -> Money {
        self.gross_price().calculate_tax(PRODUCT_TAX)
    }
}

impl Priced for LeaseLine {
    /// One month's amortized payment.
    fn gross_price(&self) -> Money {
        self.total_lease_price().divide_rounded(self.period_months())
    }

    /// Always zero. Lease tax is folded into the markup, never billed
    /// as a separate line.
    fn tax(&self) -> Money {
        Money::zero()
    }
}

impl Priced for ServiceLine {
    fn gross_price(&self) -> Money {
        self.item.base_price.scale(self.hours)
    }

    fn tax(&self) -> Money {
        self.gross_price().calculate_tax(SERVICE_TAX)
    }
}

impl Priced for DataPlanLine {
    fn gross_price(&self) -> Money {
        self.item.base_price.scale(self.gigabytes)
    }

    fn tax(&self) -> Money {
        self.gross_price().calculate_tax(DATA_PLAN_TAX)
    }
}

impl Priced for VoicePlanLine {
    fn gross_price(&self) -> Money {
        self.item.base_price.scale(self.periods)
    }

    fn tax(&self) -> Money {
        self.gross_price().calculate_tax(VOICE_PLAN_TAX)
    }
}

impl Priced for LineItem {
    fn gross_price(&self) -> Money {
        match self {
            LineItem::Purchase(line) => line.gross_price(),
            LineItem::Lease(line) => line.gross_price(),
            LineItem::Service(line) => line.gross_price(),
            LineItem::DataPlan(line) => line.gross_price(),
            LineItem::VoicePlan(line) => line.gross_price(),
        }
    }

    fn tax(&self) -> Money {
        match self {
            LineItem::Purchase(line) => line.tax(),
            LineItem::Lease(line) => line.tax(),
            LineItem::Service(line) => line.tax(),
            LineItem::DataPlan(line) => line.tax(),
            LineItem::VoicePlan(line) => line.tax(),
        }
    }
}

impl Priced for Sale {
    /// Sum of line gross prices. Each line is already cent-exact.
    fn gross_price(&self) -> Money {
        self.items.iter().map(Priced::gross_price).sum()
    }

    /// Sum of line taxes.
    fn tax(&self) -> Money {
        self.items.iter().map(Priced::tax).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Quantity;
    use crate::types::ItemSnapshot;

    fn snapshot(cents: i64) -> ItemSnapshot {
        ItemSnapshot {
            code: "c001".to_string(),
            name: "Fixture".to_string(),
            base_price: Money::from_cents(cents),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_whole_months_between() {
        assert_eq!(
            whole_months_between(date(2024, 1, 1), date(2024, 7, 1)),
            6
        );
        // day remainder truncates, never rounds
        assert_eq!(
            whole_months_between(date(2024, 1, 31), date(2024, 2, 29)),
            0
        );
        assert_eq!(
            whole_months_between(date(2024, 1, 31), date(2024, 3, 1)),
            1
        );
        assert_eq!(
            whole_months_between(date(2024, 1, 15), date(2024, 1, 15)),
            0
        );
        assert_eq!(
            whole_months_between(date(2024, 2, 1), date(2024, 1, 1)),
            -1
        );
        assert_eq!(
            whole_months_between(date(2023, 11, 10), date(2024, 2, 10)),
            3
        );
    }

    #[test]
    fn test_purchase_pricing() {
        let line = PurchaseLine::new(snapshot(99_999));
        assert_eq!(line.gross_price().cents(), 99_999);
        // $999.99 × 7.15% = $71.499285 → $71.50
        assert_eq!(line.tax().cents(), 7150);
        assert_eq!(line.net_price().cents(), 107_149);
    }

    #[test]
    fn test_lease_pricing() {
        let line = LeaseLine::new(snapshot(120_000), date(2024, 1, 1), date(2024, 7, 1)).unwrap();
        assert_eq!(line.period_months(), 6);
        assert_eq!(line.markup().cents(), 60_000);
        assert_eq!(line.total_lease_price().cents(), 180_000);
        // first month's invoice, not the lease's total value
        assert_eq!(line.gross_price().cents(), 30_000);
        assert_eq!(line.tax(), Money::zero());
        assert_eq!(line.net_price().cents(), 30_000);
    }

    #[test]
    fn test_lease_markup_rounds_half_up() {
        let line = LeaseLine::new(snapshot(101), date(2024, 1, 1), date(2024, 2, 1)).unwrap();
        // 50.5 cents rounds up
        assert_eq!(line.markup().cents(), 51);
        assert_eq!(line.total_lease_price().cents(), 152);
        assert_eq!(line.gross_price().cents(), 152);
    }

    #[test]
    fn test_service_pricing() {
        let line = ServiceLine::new(snapshot(5000), Quantity::from_millis(22_500), "u001").unwrap();
        // $50.00 × 22.5 hours = $1125.00
        assert_eq!(line.gross_price().cents(), 112_500);
        // $1125.00 × 3.5% = $39.375 → $39.38
        assert_eq!(line.tax().cents(), 3938);
        assert_eq!(line.net_price().cents(), 116_438);
    }

    #[test]
    fn test_data_plan_pricing() {
        let line = DataPlanLine::new(snapshot(1000), Quantity::from_whole(5)).unwrap();
        assert_eq!(line.gross_price().cents(), 5000);
        assert_eq!(line.tax().cents(), 275);
        assert_eq!(line.net_price().cents(), 5275);
    }

    #[test]
    fn test_voice_plan_pricing() {
        let line =
            VoicePlanLine::new(snapshot(200), "555-0101", Quantity::from_whole(30)).unwrap();
        assert_eq!(line.gross_price().cents(), 6000);
        assert_eq!(line.tax().cents(), 390);
        assert_eq!(line.net_price().cents(), 6390);
    }

    #[test]
    fn test_zero_quantity_prices_to_zero() {
        let line = DataPlanLine::new(snapshot(1000), Quantity::zero()).unwrap();
        assert_eq!(line.gross_price(), Money::zero());
        assert_eq!(line.tax(), Money::zero());
    }

    #[test]
    fn test_sale_aggregation() {
        let mut sale = Sale::new("sa01", "s001", "u001", "u002", date(2024, 3, 15)).unwrap();
        sale.add_item(LineItem::DataPlan(
            DataPlanLine::new(snapshot(1000), Quantity::from_whole(5)).unwrap(),
        ));
        sale.add_item(LineItem::VoicePlan(
            VoicePlanLine::new(snapshot(200), "555-0101", Quantity::from_whole(30)).unwrap(),
        ));

        assert_eq!(sale.gross_price().cents(), 11_000);
        assert_eq!(sale.tax().cents(), 665);
        assert_eq!(sale.net_price().cents(), 11_665);
    }

    #[test]
    fn test_empty_sale_totals_are_zero() {
        let sale = Sale::new("sa02", "s001", "u001", "u002", date(2024, 3, 15)).unwrap();
        assert_eq!(sale.gross_price(), Money::zero());
        assert_eq!(sale.tax(), Money::zero());
        assert_eq!(sale.net_price(), Money::zero());
    }

    #[test]
    fn test_line_item_dispatch_matches_variant() {
        let purchase = LineItem::Purchase(PurchaseLine::new(snapshot(1000)));
        assert_eq!(purchase.gross_price().cents(), 1000);
        // $10.00 × 7.15% = $0.715 → $0.72
        assert_eq!(purchase.tax().cents(), 72);

        let lease = LineItem::Lease(
            LeaseLine::new(snapshot(120_000), date(2024, 1, 1), date(2024, 7, 1)).unwrap(),
        );
        assert_eq!(lease.gross_price().cents(), 30_000);
        assert_eq!(lease.tax(), Money::zero());
    }
}
