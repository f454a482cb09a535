//! Account and card domain models

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// Full snapshot of the account store: uppercase username -> record.
/// Every operation loads the whole book, mutates it in memory, and
/// writes the whole book back.
pub type AccountBook = BTreeMap<String, Account>;

/// Default card brand when none is given
pub const DEFAULT_CARD_BRAND: &str = "VISA";

/// A bank account record
///
/// Admin and regular accounts share this one shape; `is_admin` is a
/// capability flag, not a separate type. Balance is never negative:
/// withdraw rejects overdrafts and deposits must be positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Opaque credential, compared verbatim
    pub password: String,
    /// ISO 4217 currency code, normalized to uppercase
    pub currency: String,
    pub balance: Decimal,
    /// Gates login for non-admin accounts
    pub activated: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub card: Option<Card>,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(password: impl Into<String>, currency: &str, is_admin: bool) -> Self {
        Self {
            password: password.into(),
            currency: Self::normalize_currency(currency),
            balance: Decimal::ZERO,
            activated: true,
            is_admin,
            card: None,
        }
    }

    /// Canonicalize a username into its store key (uppercase identity)
    pub fn normalize_key(username: &str) -> String {
        username.trim().to_uppercase()
    }

    /// Normalize a currency code to uppercase
    pub fn normalize_currency(currency: &str) -> String {
        currency.trim().to_uppercase()
    }
}

/// Parse a user-supplied amount string
///
/// Rejects non-numeric input and non-positive values alike, since every
/// ledger operation requires a strictly positive amount.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let amount: Decimal = input.trim().parse().map_err(|_| Error::InvalidAmount)?;
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount);
    }
    Ok(amount)
}

/// A payment card attached to an account (at most one per account)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub number: u64,
    /// MM/YY, not validated for calendar correctness
    pub expiration: String,
    pub brand: String,
    pub kind: CardKind,
    pub cvc: u32,
}

/// Card kind, defaults to credit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardKind {
    #[default]
    Credit,
    Debit,
}

impl CardKind {
    /// Parse free-form input; anything that isn't DEBIT falls back to credit
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("debit") {
            CardKind::Debit
        } else {
            CardKind::Credit
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Credit => "CREDIT",
            CardKind::Debit => "DEBIT",
        }
    }
}

/// A single mutable-field update applied by the admin
///
/// Only these four fields are mutable through the admin surface.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountUpdate {
    SetPassword(String),
    SetCurrency(String),
    SetBalance(Decimal),
    SetAdminFlag(bool),
}

impl AccountUpdate {
    /// Map a field-name/value pair onto an update variant
    ///
    /// Unknown field names yield `Ok(None)` and are skipped by callers.
    /// Balance values must parse as a non-negative number.
    pub fn parse(field: &str, value: &str) -> Result<Option<Self>> {
        match field.trim().to_lowercase().as_str() {
            "password" => Ok(Some(Self::SetPassword(value.to_string()))),
            "currency" => Ok(Some(Self::SetCurrency(Account::normalize_currency(value)))),
            "balance" => {
                let balance: Decimal = value
                    .trim()
                    .parse()
                    .map_err(|_| Error::invalid_value(format!("balance must be a number, got '{value}'")))?;
                if balance < Decimal::ZERO {
                    return Err(Error::invalid_value("balance cannot be negative"));
                }
                Ok(Some(Self::SetBalance(balance)))
            }
            "is_admin" => Ok(Some(Self::SetAdminFlag(is_truthy(value)))),
            _ => Ok(None),
        }
    }

    /// Apply the update to an account record
    pub fn apply(&self, account: &mut Account) {
        match self {
            Self::SetPassword(password) => account.password = password.clone(),
            Self::SetCurrency(currency) => {
                account.currency = Account::normalize_currency(currency)
            }
            Self::SetBalance(balance) => account.balance = *balance,
            Self::SetAdminFlag(is_admin) => account.is_admin = *is_admin,
        }
    }
}

/// Truthy string forms accepted for the admin flag
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "yes" | "1" | "y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalization() {
        assert_eq!(Account::normalize_key("alice"), "ALICE");
        assert_eq!(Account::normalize_key(" Bob "), "BOB");
    }

    #[test]
    fn test_currency_normalization() {
        assert_eq!(Account::normalize_currency("usd"), "USD");
        assert_eq!(Account::normalize_currency(" eur "), "EUR");
    }

    #[test]
    fn test_new_account_defaults() {
        let account = Account::new("pw", "usd", false);
        assert_eq!(account.currency, "USD");
        assert_eq!(account.balance, Decimal::ZERO);
        assert!(account.activated);
        assert!(!account.is_admin);
        assert!(account.card.is_none());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50").unwrap(), Decimal::new(1250, 2));
        assert!(matches!(parse_amount("abc"), Err(Error::InvalidAmount)));
        assert!(matches!(parse_amount("0"), Err(Error::InvalidAmount)));
        assert!(matches!(parse_amount("-3"), Err(Error::InvalidAmount)));
    }

    #[test]
    fn test_card_kind_parse() {
        assert_eq!(CardKind::parse("DEBIT"), CardKind::Debit);
        assert_eq!(CardKind::parse("debit"), CardKind::Debit);
        assert_eq!(CardKind::parse("CREDIT"), CardKind::Credit);
        // Free-form input falls back to the default
        assert_eq!(CardKind::parse("whatever"), CardKind::Credit);
        assert_eq!(CardKind::parse(""), CardKind::Credit);
    }

    #[test]
    fn test_update_parse_known_fields() {
        assert_eq!(
            AccountUpdate::parse("password", "secret").unwrap(),
            Some(AccountUpdate::SetPassword("secret".to_string()))
        );
        assert_eq!(
            AccountUpdate::parse("currency", "eur").unwrap(),
            Some(AccountUpdate::SetCurrency("EUR".to_string()))
        );
        assert_eq!(
            AccountUpdate::parse("balance", "10.25").unwrap(),
            Some(AccountUpdate::SetBalance(Decimal::new(1025, 2)))
        );
    }

    #[test]
    fn test_update_parse_admin_flag_coercion() {
        for truthy in ["true", "yes", "1", "y", "TRUE", "Yes"] {
            assert_eq!(
                AccountUpdate::parse("is_admin", truthy).unwrap(),
                Some(AccountUpdate::SetAdminFlag(true))
            );
        }
        assert_eq!(
            AccountUpdate::parse("is_admin", "no").unwrap(),
            Some(AccountUpdate::SetAdminFlag(false))
        );
    }

    #[test]
    fn test_update_parse_unknown_field_ignored() {
        assert_eq!(AccountUpdate::parse("nickname", "Al").unwrap(), None);
    }

    #[test]
    fn test_update_parse_bad_balance() {
        assert!(matches!(
            AccountUpdate::parse("balance", "lots"),
            Err(Error::InvalidValue(_))
        ));
        assert!(matches!(
            AccountUpdate::parse("balance", "-5"),
            Err(Error::InvalidValue(_))
        ));
    }

    #[test]
    fn test_update_apply() {
        let mut account = Account::new("pw", "USD", false);
        AccountUpdate::SetBalance(Decimal::new(500, 2)).apply(&mut account);
        AccountUpdate::SetCurrency("eur".to_string()).apply(&mut account);
        AccountUpdate::SetAdminFlag(true).apply(&mut account);
        assert_eq!(account.balance, Decimal::new(500, 2));
        assert_eq!(account.currency, "EUR");
        assert!(account.is_admin);
    }
}
