//! # Money Module
//!
//! Provides the `Money` and `Quantity` types for handling monetary values
//! and fractional item quantities safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    $10.00 / 3 = $3.33 (×3 = $9.99)  → Lost $0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every price is an i64 count of cents; every formula rounds once,    │
//! │    half-up, at its own boundary, so totals are reproducible exactly    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::{Money, Quantity};
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Or parse a decimal string from a data file
//! let parsed = Money::parse_decimal("10.99").unwrap();
//! assert_eq!(parsed, price);
//!
//! // Scale by a fractional quantity (22.5 hours of service)
//! let hours = Quantity::parse_decimal("22.5").unwrap();
//! let gross = price.scale(hours);
//! assert_eq!(gross.cents(), 24728); // $10.99 × 22.5 = $247.275 → $247.28
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::TaxRate;

/// Divides with half-up rounding, ties away from zero.
///
/// All pricing formulas round exactly once through this function, so the
/// convention cannot drift between tax, scaling, and amortization.
fn div_round_half_up(numerator: i128, divisor: i128) -> i64 {
    if numerator >= 0 {
        ((2 * numerator + divisor) / (2 * divisor)) as i64
    } else {
        -((2 * -numerator + divisor) / (2 * divisor)) as i64
    }
}

/// Parses a plain decimal string into integer units at the given scale.
///
/// Accepts an optional leading minus, at most `max_places` fractional
/// digits, and surrounding whitespace. No exponents, no grouping
/// separators, no currency symbols. Returns `None` on anything else.
fn parse_fixed_point(input: &str, scale: i64, max_places: usize) -> Option<i64> {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if frac.len() > max_places {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut units: i64 = 0;
    for b in whole.bytes() {
        units = units.checked_mul(10)?.checked_add((b - b'0') as i64)?;
    }
    let mut value = units.checked_mul(scale)?;
    let mut place = scale;
    for b in frac.bytes() {
        place /= 10;
        value = value.checked_add((b - b'0') as i64 * place)?;
    }
    Some(if negative { -value } else { value })
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate math may go negative even though
///   catalog prices are validated non-negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support, serialized as a bare integer
///
/// Every monetary value in the system flows through this type: the catalog
/// base price, each line item's gross price and tax, and the sale totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Parses a decimal dollar string, e.g. `"19.99"`, into cents.
    ///
    /// At most two fractional digits are accepted; a third digit means the
    /// value cannot be represented in cents and the parse fails. Missing
    /// fractional digits are zero-filled, so `"5"`, `"5."` and `"5.0"` all
    /// parse to 500 cents.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("10.99"), Some(Money::from_cents(1099)));
    /// assert_eq!(Money::parse_decimal("10.999"), None);
    /// ```
    pub fn parse_decimal(input: &str) -> Option<Self> {
        parse_fixed_point(input, 100, 2).map(Money)
    }

    /// Calculates tax at the given rate, rounded half-up to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    /// use till_core::types::TaxRate;
    ///
    /// let price = Money::from_cents(1000); // $10.00
    /// let rate = TaxRate::from_bps(825);   // 8.25%
    ///
    /// let tax = price.calculate_tax(rate);
    /// // $10.00 × 8.25% = $0.825 → rounds to $0.83 (83 cents)
    /// assert_eq!(tax.cents(), 83);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 intermediate prevents overflow on large amounts
        Money(div_round_half_up(
            self.0 as i128 * rate.bps() as i128,
            10_000,
        ))
    }

    /// Multiplies by a fractional quantity, rounded half-up to the cent.
    ///
    /// This is the unit-price × amount step shared by hourly services,
    /// per-gigabyte data plans, and per-period voice plans.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::{Money, Quantity};
    ///
    /// let rate = Money::from_cents(5000);      // $50.00 / hour
    /// let hours = Quantity::from_millis(22_500); // 22.5 hours
    /// assert_eq!(rate.scale(hours).cents(), 112_500); // $1125.00
    /// ```
    pub fn scale(&self, quantity: Quantity) -> Money {
        Money(div_round_half_up(
            self.0 as i128 * quantity.millis() as i128,
            1_000,
        ))
    }

    /// Divides by an integer, rounded half-up to the cent.
    ///
    /// The divisor must be positive. Used for the lease markup (half the
    /// base price) and the amortized first-month price.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let total = Money::from_cents(180_000); // $1800.00 over 6 months
    /// assert_eq!(total.divide_rounded(6).cents(), 30_000);
    ///
    /// let odd = Money::from_cents(101);
    /// assert_eq!(odd.divide_rounded(2).cents(), 51); // 50.5 rounds up
    /// ```
    pub fn divide_rounded(&self, divisor: i64) -> Money {
        Money(div_round_half_up(self.0 as i128, divisor as i128))
    }
}

// =============================================================================
// Money Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Summation over line items. Cent sums are exact, so no rounding here.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Quantity Type
// =============================================================================

/// A fractional amount of something sold: hours, gigabytes, or periods.
///
/// Stored as integer thousandths so that the three-decimal quantities in
/// the data files stay exact. `22.5` hours is `Quantity(22_500)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from thousandths.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Quantity(millis)
    }

    /// Creates a whole-number quantity.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Quantity;
    ///
    /// assert_eq!(Quantity::from_whole(30).millis(), 30_000);
    /// ```
    #[inline]
    pub const fn from_whole(units: i64) -> Self {
        Quantity(units * 1_000)
    }

    /// Returns zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    /// Returns the value in thousandths.
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a decimal quantity string, e.g. `"22.5"`, into thousandths.
    ///
    /// At most three fractional digits are accepted. Shares the parsing
    /// rules of [`Money::parse_decimal`], only the scale differs.
    pub fn parse_decimal(input: &str) -> Option<Self> {
        parse_fixed_point(input, 1_000, 3).map(Quantity)
    }
}

/// Display trims trailing fractional zeros: `22.5` not `22.500`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.abs();
        let whole = magnitude / 1_000;
        let frac = magnitude % 1_000;
        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let padded = format!("{:03}", frac);
            write!(f, "{}{}.{}", sign, whole, padded.trim_end_matches('0'))
        }
    }
}

/// Default quantity is zero.
impl Default for Quantity {
    fn default() -> Self {
        Quantity::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
