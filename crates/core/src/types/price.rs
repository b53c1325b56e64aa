//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are quoted in synapses, the storefront's only currency.
//! On the wire a price is a plain JSON number; a missing price is `null`
//! and is modelled as `Option<Price>` by the owning type.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in synapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Currency unit shown after every amount.
    pub const UNIT: &'static str = "synapses";

    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of synapses.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// Formats as `"<amount> synapses"`, e.g. `"1450 synapses"`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.normalize(), Self::UNIT)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_amount() {
        assert_eq!(Price::from_units(750).to_string(), "750 synapses");
        assert_eq!(Price::ZERO.to_string(), "0 synapses");
    }

    #[test]
    fn test_sum() {
        let prices = [Price::from_units(750), Price::from_units(1450), Price::ZERO];
        let total: Price = prices.iter().sum();
        assert_eq!(total, Price::from_units(2200));
    }

    #[test]
    fn test_deserialize_from_number() {
        let price: Price = serde_json::from_str("2500").unwrap();
        assert_eq!(price, Price::from_units(2500));

        let missing: Option<Price> = serde_json::from_str("null").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_value(Price::from_units(480)).unwrap();
        assert_eq!(json.as_f64(), Some(480.0));
    }
}
