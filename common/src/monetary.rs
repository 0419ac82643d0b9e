//! Monetary types for ratepath.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CurrencyError;

/// Normalized currency code (uppercase ASCII letters, e.g. `USD`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Parse and normalize a code from untrusted input.
    ///
    /// Surrounding whitespace is trimmed and letters are uppercased. The
    /// remaining code must be non-empty and purely alphabetic.
    pub fn parse(code: &str) -> Result<Self, CurrencyError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(CurrencyError::EmptyCode);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyError::MalformedCode(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::known("USD")
    }

    pub fn eur() -> Self {
        Self::known("EUR")
    }

    pub fn gbp() -> Self {
        Self::known("GBP")
    }

    pub fn jpy() -> Self {
        Self::known("JPY")
    }

    fn known(code: &'static str) -> Self {
        Self(code.to_string())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

/// A directed exchange relation: one unit of `from` buys `rate` units of `to`.
///
/// No reverse edge is implied. The rate is not checked here because rate
/// sources may hand back bad data; graph construction filters it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeEdge {
    pub from: Currency,
    pub to: Currency,
    pub rate: Decimal,
}

impl ExchangeEdge {
    /// Create a new exchange edge.
    pub fn new(from: Currency, to: Currency, rate: Decimal) -> Self {
        Self { from, to, rate }
    }

    /// Whether the rate is strictly positive.
    pub fn has_valid_rate(&self) -> bool {
        self.rate > Decimal::ZERO
    }

    /// Check if this edge connects `from` to `to`.
    pub fn connects(&self, from: &Currency, to: &Currency) -> bool {
        &self.from == from && &self.to == to
    }
}

impl fmt::Display for ExchangeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}@{}", self.from, self.to, self.rate)
    }
}

/// One hop of a conversion with the running amount after the hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStep {
    pub from: Currency,
    pub to: Currency,
    pub amount: Decimal,
}

impl ConversionStep {
    /// Create a new conversion step.
    pub fn new(from: Currency, to: Currency, amount: Decimal) -> Self {
        Self { from, to, amount }
    }

    /// Step that leaves the amount untouched.
    pub fn identity(currency: Currency, amount: Decimal) -> Self {
        Self {
            from: currency.clone(),
            to: currency,
            amount,
        }
    }
}

impl fmt::Display for ConversionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

/// Collect the distinct currencies mentioned by `edges`, in first-seen order.
///
/// For each edge the source currency is considered before the destination.
pub fn currencies_of(edges: &[ExchangeEdge]) -> Vec<Currency> {
    let mut seen = std::collections::HashSet::new();
    let mut currencies = Vec::new();

    for edge in edges {
        for currency in [&edge.from, &edge.to] {
            if seen.insert(currency.clone()) {
                currencies.push(currency.clone());
            }
        }
    }

    currencies
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_parse_normalizes() {
        assert_eq!(Currency::parse(" usd ").unwrap(), Currency::usd());
        assert_eq!(Currency::parse("eUr").unwrap().code(), "EUR");
    }

    #[test]
    fn test_currency_parse_rejects_bad_codes() {
        assert_eq!(Currency::parse(""), Err(CurrencyError::EmptyCode));
        assert_eq!(Currency::parse("   "), Err(CurrencyError::EmptyCode));
        assert!(matches!(
            Currency::parse("US1"),
            Err(CurrencyError::MalformedCode(_))
        ));
        assert!(matches!(
            Currency::parse("U-SD"),
            Err(CurrencyError::MalformedCode(_))
        ));
    }

    #[test]
    fn test_from_str_validates() {
        assert_eq!("gbp".parse::<Currency>().unwrap(), Currency::gbp());
        assert_eq!("".parse::<Currency>(), Err(CurrencyError::EmptyCode));
        assert!(matches!(
            "U$D".parse::<Currency>(),
            Err(CurrencyError::MalformedCode(_))
        ));
    }

    #[test]
    fn test_edge_deserializes_and_normalizes() {
        let json = r#"{"from": "usd", "to": "EUR", "rate": "0.85"}"#;
        let edge: ExchangeEdge = serde_json::from_str(json).unwrap();

        assert_eq!(edge.from, Currency::usd());
        assert_eq!(edge.to, Currency::eur());
        assert_eq!(edge.rate, dec!(0.85));
    }

    #[test]
    fn test_edge_rejects_malformed_code() {
        let json = r#"{"from": "", "to": "EUR", "rate": "0.85"}"#;
        assert!(serde_json::from_str::<ExchangeEdge>(json).is_err());
    }

    #[test]
    fn test_edge_rate_validity() {
        let ok = ExchangeEdge::new(Currency::usd(), Currency::eur(), dec!(0.85));
        let zero = ExchangeEdge::new(Currency::usd(), Currency::eur(), Decimal::ZERO);
        let negative = ExchangeEdge::new(Currency::usd(), Currency::eur(), dec!(-1));

        assert!(ok.has_valid_rate());
        assert!(!zero.has_valid_rate());
        assert!(!negative.has_valid_rate());
    }

    #[test]
    fn test_currencies_of_dedupes_in_order() {
        let edges = vec![
            ExchangeEdge::new(Currency::usd(), Currency::eur(), dec!(0.85)),
            ExchangeEdge::new(Currency::eur(), Currency::gbp(), dec!(0.9)),
            ExchangeEdge::new(Currency::gbp(), Currency::usd(), dec!(1.3)),
        ];

        assert_eq!(
            currencies_of(&edges),
            vec![Currency::usd(), Currency::eur(), Currency::gbp()]
        );
        assert!(currencies_of(&[]).is_empty());
    }
}
