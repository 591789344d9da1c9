//! Monetary value object with fixed precision.

use std::iter::Sum;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when constructing or combining [`Money`] values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The amount was negative.
    #[error("Money amount cannot be negative: {0}")]
    Negative(Decimal),

    /// The input string was not a valid decimal number.
    #[error("Invalid money amount: {0}")]
    Parse(String),

    /// A multiplication factor was negative.
    #[error("Money factor cannot be negative: {0}")]
    NegativeFactor(i64),
}

/// A non-negative monetary amount, always normalized to exactly two
/// fractional digits with half-up rounding.
///
/// Equality is by normalized value: `Money::of("10.0")` equals
/// `Money::of("10.00")`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a money value from a decimal amount.
    ///
    /// Fails for negative input; any extra fractional digits are rounded
    /// half-up to scale 2.
    pub fn of(amount: Decimal) -> Result<Self, MoneyError> {
        if amount < Decimal::ZERO {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(normalize(amount)))
    }

    /// The additive identity.
    pub fn zero() -> Self {
        Self(normalize(Decimal::ZERO))
    }

    /// Returns the normalized amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds another amount. Closed over non-negative values, so this
    /// cannot violate the invariant.
    pub fn add(&self, other: Money) -> Money {
        Money(normalize(self.0 + other.0))
    }

    /// Multiplies by an integer factor.
    ///
    /// A factor of zero yields zero; a negative factor is rejected since
    /// it would produce a negative amount.
    pub fn multiply(&self, factor: i64) -> Result<Money, MoneyError> {
        if factor < 0 {
            return Err(MoneyError::NegativeFactor(factor));
        }
        Ok(Money(normalize(self.0 * Decimal::from(factor))))
    }
}

fn normalize(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| MoneyError::Parse(s.to_string()))?;
        Self::of(amount)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money::add(&self, rhs)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = Money::add(self, rhs);
    }
}

/// Quantity scaling for line-item subtotals. Infallible: a non-negative
/// amount times a non-negative quantity stays non-negative.
impl std::ops::Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Self::Output {
        Money(normalize(self.0 * Decimal::from(quantity)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc.add(m))
    }
}
