//! Exchange-rate table and the currency converter over it

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::account::Account;
use crate::domain::result::{Error, Result};

/// Exchange rates relative to a base currency
///
/// Rates are units of currency per one unit of base. The table is
/// immutable for the converter's lifetime; only the external refresh
/// job rewrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub base: String,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rates: BTreeMap<String, Decimal>,
}

impl RateTable {
    /// An empty table over the given base currency
    ///
    /// Every non-base lookup fails until a refresh fills the table.
    pub fn empty(base: &str) -> Self {
        Self {
            base: Account::normalize_currency(base),
            last_updated: None,
            rates: BTreeMap::new(),
        }
    }

    /// Rate for a currency code (1 for the base itself)
    pub fn rate(&self, code: &str) -> Result<Decimal> {
        let code = Account::normalize_currency(code);
        if code == self.base {
            return Ok(Decimal::ONE);
        }
        self.rates
            .get(&code)
            .copied()
            .ok_or(Error::UnknownCurrency(code))
    }

    /// Convert an amount between two currencies, normalizing through
    /// the base: `(amount / rate(from)) * rate(to)`.
    ///
    /// No rounding happens here; callers round for storage/display.
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal> {
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        let base_amount = amount
            .checked_div(from_rate)
            .ok_or_else(|| Error::Rates(format!("non-positive rate for {from}")))?;
        Ok(base_amount * to_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        let mut rates = BTreeMap::new();
        rates.insert("EUR".to_string(), Decimal::new(9, 1)); // 0.9
        rates.insert("GBP".to_string(), Decimal::new(8, 1)); // 0.8
        RateTable {
            base: "USD".to_string(),
            last_updated: None,
            rates,
        }
    }

    #[test]
    fn test_base_rate_is_one() {
        assert_eq!(table().rate("USD").unwrap(), Decimal::ONE);
        assert_eq!(table().rate("usd").unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_unknown_currency() {
        assert!(matches!(
            table().rate("JPY"),
            Err(Error::UnknownCurrency(code)) if code == "JPY"
        ));
    }

    #[test]
    fn test_convert_through_base() {
        // 100 EUR -> USD -> GBP = (100 / 0.9) * 0.8 ~= 88.89
        let converted = table().convert(Decimal::from(100), "EUR", "GBP").unwrap();
        assert_eq!(converted.round_dp(2), Decimal::new(8889, 2));
    }

    #[test]
    fn test_convert_same_currency_is_identity() {
        let amount = Decimal::new(12345, 2);
        assert_eq!(table().convert(amount, "EUR", "EUR").unwrap(), amount);
        assert_eq!(table().convert(amount, "USD", "usd").unwrap(), amount);
    }

    #[test]
    fn test_convert_round_trips_within_tolerance() {
        let table = table();
        let amount = Decimal::new(100_00, 2);
        let there = table.convert(amount, "EUR", "GBP").unwrap().round_dp(2);
        let back = table.convert(there, "GBP", "EUR").unwrap().round_dp(2);
        assert!((back - amount).abs() <= Decimal::new(1, 2));
    }

    #[test]
    fn test_empty_table_only_knows_base() {
        let table = RateTable::empty("usd");
        assert_eq!(table.base, "USD");
        assert!(table.rate("USD").is_ok());
        assert!(table.rate("EUR").is_err());
    }
}
