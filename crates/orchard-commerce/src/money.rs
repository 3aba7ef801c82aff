//! Money type for representing monetary values.
//!
//! The store sells in a single currency (Vietnamese dong), so `Money` is a
//! plain exact decimal amount. Arithmetic never rounds; rounding happens only
//! when a value is formatted for display.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Currency symbol appended by [`Money::display`].
pub const CURRENCY_SYMBOL: &str = "\u{20ab}";

/// An exact monetary amount in dong.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    /// Create a Money value from a decimal amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money value from a whole number of dong.
    ///
    /// ```
    /// use orchard_commerce::money::Money;
    /// let price = Money::from_units(100_000);
    /// assert_eq!(price.display(), "100.000 \u{20ab}");
    /// ```
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The zero amount.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The exact underlying amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply by a quantity. Saturates at the representable bounds.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Calculate a percentage of this amount, exactly.
    ///
    /// Amounts too large to scale first are divided first instead.
    pub fn percentage(&self, percent: Decimal) -> Money {
        match self.0.checked_mul(percent) {
            Some(scaled) => Money(scaled / Decimal::ONE_HUNDRED),
            None => Money((self.0 / Decimal::ONE_HUNDRED).saturating_mul(percent)),
        }
    }

    /// Amount as `f64`, for range sliders.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Format for display, rounded to whole dong with `.` grouping
    /// (e.g. `"470.000 ₫"`).
    pub fn display(&self) -> String {
        format!("{} {}", self.display_amount(), CURRENCY_SYMBOL)
    }

    /// Format the rounded amount without the currency symbol.
    pub fn display_amount(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let digits = rounded.abs().trunc().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
