//! Money type for representing prices and totals.
//!
//! The storefront prices everything in whole Kenyan shillings, so amounts are
//! plain integers with no minor unit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency code shown next to every amount.
pub const CURRENCY_CODE: &str = "KES";

/// An amount in whole Kenyan shillings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero shillings.
    pub const ZERO: Money = Money(0);

    /// Create a Money value from whole shillings.
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Create a price from a decimal amount.
    ///
    /// Rounds to the nearest shilling. Negative, NaN and infinite inputs
    /// become zero since a price is never negative.
    ///
    /// ```
    /// use medihub_commerce::money::Money;
    /// assert_eq!(Money::from_decimal(4499.6).amount(), 4500);
    /// assert_eq!(Money::from_decimal(-3.0), Money::ZERO);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() || amount <= 0.0 {
            return Self::ZERO;
        }
        let rounded = amount.round();
        if rounded >= i64::MAX as f64 {
            Self(i64::MAX)
        } else {
            Self(rounded as i64)
        }
    }

    /// Get the amount in shillings.
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Add another amount, returning None on overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn checked_mul(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(quantity)).map(Money)
    }

    /// Sum amounts, returning None on overflow.
    pub fn try_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
    }

    /// Format as a display string (e.g., "KES 4,500").
    pub fn display(&self) -> String {
        format!("{} {}", CURRENCY_CODE, self.display_amount())
    }

    /// Format the amount with thousands separators (e.g., "4,500").
    pub fn display_amount(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.0 < 0 {
            grouped.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        grouped
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
