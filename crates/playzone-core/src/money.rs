//! # Money Module
//!
//! Provides the `Money` type for handling rupiah amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE CALL-SITE ROUNDING PROBLEM                                         │
//! │                                                                         │
//! │  Prices arrive from the API as JSON numbers: 15000, 12500.5, "9000"    │
//! │  If every summary view multiplies and rounds on its own:               │
//! │    view A: round(12500.5 × 3) = 37502                                  │
//! │    view B: round(12500.5) × 3 = 37503  → totals disagree               │
//! │                                                                         │
//! │  OUR SOLUTION: Round Once, At The Boundary                             │
//! │    12500.5 → Money(12501) when deserialized                            │
//! │    every total after that is exact integer arithmetic                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use playzone_core::money::Money;
//!
//! let price = Money::from_rupiah(10_000);
//! let doubled = price * 2u32;
//! assert_eq!(doubled.rupiah(), 20_000);
//! assert_eq!(doubled.to_string(), "Rp 20.000");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating operators**: API prices are untrusted, so sums and
///   products clamp at `i64::MIN`/`i64::MAX` instead of overflowing
/// - **Custom Deserialize**: Accepts integers, floats and numeric strings
///   from the API, rounding exactly once
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  FoodItem.price ──► CartLine.price ──► CartLine.line_total ──┐          │
/// │                                                               ▼         │
/// │  Room.price_per_hour × duration ──► BookingQuote.rental ──► total      │
/// │                                                               ▲         │
/// │  Promo.discount_percent ──────────► BookingQuote.discount ───┘          │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupiah.
    #[inline]
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Money(rupiah)
    }

    /// Converts an amount received as a JSON number into Money.
    ///
    /// This is the ONLY place where currency rounding happens. Fractions
    /// round half away from zero (`12500.5` → `12501`).
    ///
    /// Returns `None` for NaN, infinities and values outside `i64`.
    ///
    /// ## Example
    /// ```rust
    /// use playzone_core::money::Money;
    ///
    /// assert_eq!(Money::from_api_amount(12500.5), Some(Money::from_rupiah(12501)));
    /// assert_eq!(Money::from_api_amount(f64::NAN), None);
    /// ```
    pub fn from_api_amount(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let rounded = amount.round();
        if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
            return None;
        }
        Some(Money(rounded as i64))
    }

    /// Returns the value in rupiah.
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Calculates the discount amount for a rate, rounding half up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    ///
    /// ## Example
    /// ```rust
    /// use playzone_core::money::Money;
    /// use playzone_core::types::DiscountRate;
    ///
    /// let rental = Money::from_rupiah(45_005);
    /// let discount = rental.discount_for(DiscountRate::from_percent(10));
    /// // 4500.5 → 4501
    /// assert_eq!(discount.rupiah(), 4_501);
    /// ```
    pub fn discount_for(&self, rate: DiscountRate) -> Money {
        // i128 so large totals times bps cannot overflow
        let amount = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(amount as i64)
    }

    /// Formats with an explicit currency symbol and thousands separator.
    ///
    /// ## Example
    /// ```rust
    /// use playzone_core::money::Money;
    ///
    /// let total = Money::from_rupiah(1_250_000);
    /// assert_eq!(total.format_with("IDR ", ','), "IDR 1,250,000");
    /// ```
    pub fn format_with(&self, symbol: &str, separator: char) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}",
            sign,
            symbol,
            group_thousands(self.0.unsigned_abs(), separator)
        )
    }
}

/// Inserts `separator` between every group of three digits.
fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

/// Shapes the API has been seen to send for amounts.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Whole(i64),
    Fractional(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let amount = match RawAmount::deserialize(deserializer)? {
            RawAmount::Whole(value) => return Ok(Money(value)),
            RawAmount::Fractional(value) => value,
            RawAmount::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("invalid amount: {:?}", text)))?,
        };

        Money::from_api_amount(amount)
            .ok_or_else(|| D::Error::custom(format!("amount out of range: {}", amount)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays as Indonesian rupiah: `Rp 20.000`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("Rp ", '.'))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0.saturating_mul(i64::from(qty)))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_rupiah(20_000).to_string(), "Rp 20.000");
        assert_eq!(Money::from_rupiah(500).to_string(), "Rp 500");
        assert_eq!(Money::from_rupiah(1_234_567).to_string(), "Rp 1.234.567");
        assert_eq!(Money::from_rupiah(-5_000).to_string(), "-Rp 5.000");
        assert_eq!(Money::zero().to_string(), "Rp 0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupiah(10_000);
        let b = Money::from_rupiah(2_500);

        assert_eq!((a + b).rupiah(), 12_500);
        assert_eq!((a - b).rupiah(), 7_500);
        assert_eq!((a * 3u32).rupiah(), 30_000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.rupiah(), 15_000);
    }

    #[test]
    fn test_from_api_amount_rounds_once() {
        assert_eq!(Money::from_api_amount(12_500.5).unwrap().rupiah(), 12_501);
        assert_eq!(Money::from_api_amount(12_500.4).unwrap().rupiah(), 12_500);
        assert_eq!(Money::from_api_amount(-2.5).unwrap().rupiah(), -3);
        assert!(Money::from_api_amount(f64::INFINITY).is_none());
        assert!(Money::from_api_amount(1e30).is_none());
        // 2^63 rounds to a float equal to i64::MAX as f64 but does not fit
        assert!(Money::from_api_amount(9.223372036854775807e18).is_none());
        assert!(Money::from_api_amount(-9.223372036854775808e18).is_some());
    }

    #[test]
    fn test_deserialize_accepts_api_shapes() {
        let whole: Money = serde_json::from_str("15000").unwrap();
        assert_eq!(whole.rupiah(), 15_000);

        let fractional: Money = serde_json::from_str("12500.5").unwrap();
        assert_eq!(fractional.rupiah(), 12_501);

        let text: Money = serde_json::from_str("\"9000.00\"").unwrap();
        assert_eq!(text.rupiah(), 9_000);

        assert!(serde_json::from_str::<Money>("\"free\"").is_err());
    }

    #[test]
    fn test_serialize_as_integer() {
        let json = serde_json::to_string(&Money::from_rupiah(20_000)).unwrap();
        assert_eq!(json, "20000");
    }

    #[test]
    fn test_discount() {
        let subtotal = Money::from_rupiah(100_000);
        let rate = DiscountRate::from_percent(15);
        assert_eq!(subtotal.discount_for(rate).rupiah(), 15_000);
        assert_eq!((subtotal - subtotal.discount_for(rate)).rupiah(), 85_000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_rupiah(5_000_000_000_000_000_000);
        assert_eq!((huge + huge).rupiah(), i64::MAX);
        assert_eq!((huge * 3u32).rupiah(), i64::MAX);
        assert_eq!((huge * -2i64).rupiah(), i64::MIN);
        assert_eq!((Money::from_rupiah(-huge.rupiah()) - huge).rupiah(), i64::MIN);

        let mut running = huge;
        running += huge;
        assert_eq!(running.rupiah(), i64::MAX);
        running -= Money::from_rupiah(i64::MAX);
        assert!(running.is_zero());

        let total: Money = vec![huge, huge, Money::from_rupiah(-1)].into_iter().sum();
        assert_eq!(total.rupiah(), i64::MAX - 1);
    }

    #[test]
    fn test_format_with_custom_separator() {
        assert_eq!(Money::from_rupiah(999).format_with("$", ','), "$999");
        assert_eq!(Money::from_rupiah(1_000).format_with("$", ','), "$1,000");
        assert_eq!(Money::from_rupiah(-12_345).format_with("", ' '), "-12 345");
    }
}
