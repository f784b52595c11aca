//! # Money Module
//!
//! Provides the `Money` type for monetary results.
//!
//! ## Decimals In, Hundredths Out
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    3 × 1.005 = 3.0149999999999997  → rounds to 3.01  ❌ WRONG!          │
//! │                                                                         │
//! │  OUR SOLUTION:                                                          │
//! │    Inputs (weight, count, price) are rust_decimal::Decimal             │
//! │    3 × 1.005 = 3.015 exactly       → rounds to 3.02  ✅                 │
//! │    Results are Money: integer hundredths (i64)                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use wekala_core::money::Money;
//!
//! let total = Money::from_decimal(Decimal::new(3015, 3)); // 3.015
//! assert_eq!(total.cents(), 302);
//! assert_eq!(total.to_string(), "3.02");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use ts_rs::TS;

/// Decimal places kept on every monetary result.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in hundredths of the currency unit (piasters for EGP).
///
/// ## Design Decisions
/// - **i64 (signed)**: ledger credits are negative amounts
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Arithmetic saturates**: totals must never panic on absurd input
///
/// ## Where Money is Used
/// ```text
/// SaleLine (price, count, weight: Decimal) ──► compute_total ──► Money
///
/// LedgerEntry.amount (Decimal) ──► customer_balance ──► Money
///
/// TreasuryEntry.amount (Decimal) ──► treasury_balance ──► Money
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from hundredths.
    ///
    /// ## Example
    /// ```rust
    /// use wekala_core::money::Money;
    ///
    /// let total = Money::from_cents(2700); // 27.00
    /// assert_eq!(total.cents(), 2700);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a decimal amount to two places, half away from zero.
    ///
    /// This is the `round2` used by every total in the system: a tie on the
    /// cent boundary goes up for positive amounts and down for negative ones.
    /// Amounts beyond the i64 range saturate.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use wekala_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(Decimal::new(1005, 3)).cents(), 101);   // 1.005
    /// assert_eq!(Money::from_decimal(Decimal::new(-1005, 3)).cents(), -101); // -1.005
    /// assert_eq!(Money::from_decimal(Decimal::new(1004, 3)).cents(), 100);   // 1.004
    /// ```
    pub fn from_decimal(amount: Decimal) -> Self {
        let rounded = amount
            .round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

        match rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
        {
            Some(cents) => Money(cents),
            None if rounded.is_sign_negative() => Money(i64::MIN),
            None => Money(i64::MAX),
        }
    }

    /// Adds up decimal amounts and rounds the sum once.
    ///
    /// Balances are summed at full precision before rounding, so a column of
    /// third-cent amounts does not drift. The running sum saturates.
    pub fn from_decimal_sum<I>(amounts: I) -> Self
    where
        I: IntoIterator<Item = Decimal>,
    {
        let sum = amounts.into_iter().fold(Decimal::ZERO, |acc, amount| {
            acc.checked_add(amount).unwrap_or(if amount.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
        });
        Money::from_decimal(sum)
    }

    /// Returns the amount as a two-place decimal (for the wire format).
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use wekala_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2750).to_decimal(), Decimal::new(2750, 2));
    /// ```
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MONEY_DECIMAL_PLACES)
    }

    /// Returns the value in hundredths.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (pounds) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
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
        Money(self.0.saturating_abs())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering, no currency symbol.
///
/// The desk app prefixes the configured symbol for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
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

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
