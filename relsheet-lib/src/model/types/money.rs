//! Currency amounts

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::Deserialize;
use serde::Serialize;

/// A currency amount, always held at two decimal places.
///
/// Which currency is meant is a property of the column, not of the value.
///
/// # Example
///
/// ```
/// use relsheet_lib::model::types::Money;
/// use rust_decimal::Decimal;
///
/// let price = Money::new(Decimal::new(19999, 3));
/// assert_eq!(price.to_string(), "20.00");
/// assert_eq!(Money::parse("$1,250.5"), Some(Money::new(Decimal::new(125050, 2))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Rounds `value` half away from zero to cents.
    pub fn new(value: Decimal) -> Self {
        let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        Self(cents)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Whole currency units.
    pub fn from_int(value: i64) -> Self {
        Self::new(Decimal::from(value))
    }

    /// Converts a float, as found in JSON documents.
    pub fn from_f64(value: f64) -> Option<Self> {
        Decimal::try_from(value).ok().map(Self::new)
    }

    /// Parses typed input such as `12.5`, `$1,250.00` or `1e3`.
    ///
    /// A leading dollar sign, thousands separators and inner whitespace are ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let cleaned: String = input
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();
        if cleaned.is_empty() {
            return None;
        }
        Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .ok()
            .map(Self::new)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(Money::new(Decimal::new(12345, 3)).to_string(), "12.35");
        assert_eq!(Money::new(Decimal::new(-12345, 3)).to_string(), "-12.35");
        assert_eq!(Money::from_int(5).to_string(), "5.00");
    }

    #[test]
    fn test_money_equality_ignores_input_scale() {
        assert_eq!(Money::new(Decimal::new(150, 2)), Money::new(Decimal::new(15, 1)));
    }

    #[test]
    fn test_parse_typed_amounts() {
        assert_eq!(Money::parse(" $ 1,000 ").map(|m| m.to_string()), Some("1000.00".into()));
        assert_eq!(Money::parse("2.5e1").map(|m| m.to_string()), Some("25.00".into()));
        assert_eq!(Money::parse("$"), None);
        assert_eq!(Money::parse("ten"), None);
    }

    #[test]
    fn test_deserialize_rounds() {
        let money: Money = serde_json::from_str("\"3.14159\"").unwrap();
        assert_eq!(money.to_string(), "3.14");
    }
}
