//! # Money Module
//!
//! Provides the `Money` type for monetary values.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Partner prices carry more than two fractional digits (10.005 р),      │
//! │  so integer kopecks cannot hold them either.                           │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    3 × 10.005 = 30.015 exactly, rounded once at the end → 30.02        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use partner_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_decimal(Decimal::new(10005, 3)); // 10.005
//! let line = price.multiply_quantity(3);                    // 30.015
//! assert_eq!(line.round_to_cents().to_string(), "30.02");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Fractional digits kept in displayed and stored totals.
pub const CURRENCY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in roubles.
///
/// Unit prices keep whatever precision they were entered with; totals are
/// rounded once with [`Money::round_to_cents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from kopecks (hundredths).
    ///
    /// ## Example
    /// ```rust
    /// use partner_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CURRENCY_DECIMALS))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to two decimal places using Bankers Rounding.
    ///
    /// ## Bankers Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  BANKERS ROUNDING (Round Half to Even)                              │
    /// │                                                                     │
    /// │  30.015 → 30.02   (1 is odd, round to even 2)                       │
    /// │  30.025 → 30.02   (2 is even, stays)                                │
    /// │  30.0251 → 30.03  (not a tie)                                       │
    /// │                                                                     │
    /// │  Over many orders this avoids a systematic upward drift.           │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn round_to_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Floors negative amounts at zero.
    pub fn clamp_non_negative(&self) -> Money {
        if self.is_negative() {
            Money::zero()
        } else {
            *self
        }
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Saturates at the decimal range instead of panicking.
    ///
    /// ## Example
    /// ```rust
    /// use partner_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_cents(897));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Money {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals, e.g. `1234.50`.
///
/// Currency symbols and digit grouping belong to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round_to_cents().0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
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
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::from_decimal(dec!(30.015)).to_string(), "30.02");
    }

    #[test]
    fn test_bankers_rounding() {
        assert_eq!(Money::from_decimal(dec!(30.015)).round_to_cents().amount(), dec!(30.02));
        assert_eq!(Money::from_decimal(dec!(30.025)).round_to_cents().amount(), dec!(30.02));
        assert_eq!(Money::from_decimal(dec!(30.0251)).round_to_cents().amount(), dec!(30.03));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(a - b, Money::from_cents(500));
        assert_eq!(a.multiply_quantity(3), Money::from_cents(3000));

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_cents(2000));
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_cents(-100).clamp_non_negative(), Money::zero());
        assert_eq!(Money::from_cents(100).clamp_non_negative(), Money::from_cents(100));
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::zero().is_negative());
    }

    #[test]
    fn test_multiply_saturates() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert_eq!(huge.multiply_quantity(2).amount(), Decimal::MAX);
    }
}
