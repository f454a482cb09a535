//! Ledger service - deposit, withdraw, currency change, balance view

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::Account;
use crate::ports::{AccountStore, RateStore};

/// Validated mutations over a single account record
pub struct LedgerService {
    accounts: Arc<dyn AccountStore>,
    rates: Arc<dyn RateStore>,
}

/// Read-only projection of an account's balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceView {
    pub account: String,
    pub balance: Decimal,
    pub currency: String,
}

/// Outcome of a currency change
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyChange {
    pub account: String,
    pub old_currency: String,
    pub new_currency: String,
    pub balance: Decimal,
}

impl LedgerService {
    pub fn new(accounts: Arc<dyn AccountStore>, rates: Arc<dyn RateStore>) -> Self {
        Self { accounts, rates }
    }

    /// Current balance and currency of an account
    pub fn view_balance(&self, username: &str) -> Result<BalanceView> {
        let key = Account::normalize_key(username);
        let book = self.accounts.load_snapshot()?;
        let account = book.get(&key).ok_or_else(|| Error::not_found(&key))?;
        Ok(BalanceView {
            account: key,
            balance: account.balance,
            currency: account.currency.clone(),
        })
    }

    /// Add a positive amount to the balance and persist
    pub fn deposit(&self, username: &str, amount: Decimal) -> Result<BalanceView> {
        ensure_positive(amount)?;
        let key = Account::normalize_key(username);
        let mut book = self.accounts.load_snapshot()?;
        let account = book.get_mut(&key).ok_or_else(|| Error::not_found(&key))?;

        account.balance += amount;
        let view = BalanceView {
            account: key,
            balance: account.balance,
            currency: account.currency.clone(),
        };
        self.accounts.save_snapshot(&book)?;
        Ok(view)
    }

    /// Subtract a positive amount not exceeding the balance and persist
    pub fn withdraw(&self, username: &str, amount: Decimal) -> Result<BalanceView> {
        ensure_positive(amount)?;
        let key = Account::normalize_key(username);
        let mut book = self.accounts.load_snapshot()?;
        let account = book.get_mut(&key).ok_or_else(|| Error::not_found(&key))?;

        if amount > account.balance {
            return Err(Error::InsufficientFunds);
        }
        account.balance -= amount;
        let view = BalanceView {
            account: key,
            balance: account.balance,
            currency: account.currency.clone(),
        };
        self.accounts.save_snapshot(&book)?;
        Ok(view)
    }

    /// Convert the full balance into a new currency and persist
    ///
    /// Changing to the current currency is a successful no-op and never
    /// touches the rate table. An unknown target currency aborts before
    /// any write, leaving the record as it was.
    pub fn change_currency(&self, username: &str, new_currency: &str) -> Result<CurrencyChange> {
        let key = Account::normalize_key(username);
        let new_currency = Account::normalize_currency(new_currency);
        let mut book = self.accounts.load_snapshot()?;
        let account = book.get_mut(&key).ok_or_else(|| Error::not_found(&key))?;

        if account.currency == new_currency {
            return Ok(CurrencyChange {
                account: key,
                old_currency: new_currency.clone(),
                new_currency,
                balance: account.balance,
            });
        }

        let table = self.rates.load_rates()?;
        let converted = table.convert(account.balance, &account.currency, &new_currency)?;

        let old_currency = std::mem::replace(&mut account.currency, new_currency.clone());
        account.balance = converted.round_dp(2);
        let change = CurrencyChange {
            account: key,
            old_currency,
            new_currency,
            balance: account.balance,
        };
        self.accounts.save_snapshot(&book)?;
        Ok(change)
    }
}

fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::{AccountBook, RateTable};

    fn service_with(book: AccountBook) -> (Arc<MemoryStore>, LedgerService) {
        let mut table = RateTable::empty("USD");
        table.rates.insert("EUR".to_string(), Decimal::new(9, 1));
        table.rates.insert("GBP".to_string(), Decimal::new(8, 1));
        let store = Arc::new(MemoryStore::new(table));
        store.save_snapshot(&book).unwrap();
        let service = LedgerService::new(store.clone(), store.clone());
        (store, service)
    }

    fn book_with_alice(balance: Decimal, currency: &str) -> AccountBook {
        let mut account = Account::new("pw", currency, false);
        account.balance = balance;
        let mut book = AccountBook::new();
        book.insert("ALICE".to_string(), account);
        book
    }

    #[test]
    fn test_deposit_then_withdraw_restores_balance() {
        let (_, service) = service_with(book_with_alice(Decimal::new(5000, 2), "USD"));
        let amount = Decimal::new(1234, 2);
        service.deposit("alice", amount).unwrap();
        let view = service.withdraw("alice", amount).unwrap();
        assert_eq!(view.balance, Decimal::new(5000, 2));
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let (store, service) = service_with(book_with_alice(Decimal::ZERO, "USD"));
        assert!(matches!(
            service.deposit("alice", Decimal::ZERO),
            Err(Error::InvalidAmount)
        ));
        assert!(matches!(
            service.deposit("alice", Decimal::new(-100, 2)),
            Err(Error::InvalidAmount)
        ));
        assert_eq!(
            store.load_snapshot().unwrap()["ALICE"].balance,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_withdraw_more_than_balance_fails_unchanged() {
        let (store, service) = service_with(book_with_alice(Decimal::new(1000, 2), "USD"));
        assert!(matches!(
            service.withdraw("alice", Decimal::new(1001, 2)),
            Err(Error::InsufficientFunds)
        ));
        assert_eq!(
            store.load_snapshot().unwrap()["ALICE"].balance,
            Decimal::new(1000, 2)
        );
    }

    #[test]
    fn test_withdraw_full_balance_allowed() {
        let (_, service) = service_with(book_with_alice(Decimal::new(1000, 2), "USD"));
        let view = service.withdraw("alice", Decimal::new(1000, 2)).unwrap();
        assert_eq!(view.balance, Decimal::ZERO);
    }

    #[test]
    fn test_change_currency_same_code_is_noop() {
        let (store, service) = service_with(book_with_alice(Decimal::new(1000, 2), "USD"));
        let change = service.change_currency("alice", "usd").unwrap();
        assert_eq!(change.balance, Decimal::new(1000, 2));
        let account = &store.load_snapshot().unwrap()["ALICE"];
        assert_eq!(account.currency, "USD");
        assert_eq!(account.balance, Decimal::new(1000, 2));
    }

    #[test]
    fn test_change_currency_converts_and_rounds() {
        // 100 EUR -> GBP = (100 / 0.9) * 0.8 = 88.888... -> 88.89
        let (store, service) = service_with(book_with_alice(Decimal::from(100), "EUR"));
        let change = service.change_currency("alice", "GBP").unwrap();
        assert_eq!(change.old_currency, "EUR");
        assert_eq!(change.new_currency, "GBP");
        assert_eq!(change.balance, Decimal::new(8889, 2));

        let account = &store.load_snapshot().unwrap()["ALICE"];
        assert_eq!(account.currency, "GBP");
        assert_eq!(account.balance, Decimal::new(8889, 2));
    }

    #[test]
    fn test_change_currency_unknown_code_leaves_state() {
        let (store, service) = service_with(book_with_alice(Decimal::from(100), "EUR"));
        assert!(matches!(
            service.change_currency("alice", "XYZ"),
            Err(Error::UnknownCurrency(_))
        ));
        let account = &store.load_snapshot().unwrap()["ALICE"];
        assert_eq!(account.currency, "EUR");
        assert_eq!(account.balance, Decimal::from(100));
    }

    #[test]
    fn test_unknown_account() {
        let (_, service) = service_with(AccountBook::new());
        assert!(matches!(
            service.view_balance("ghost"),
            Err(Error::AccountNotFound(_))
        ));
    }
}
