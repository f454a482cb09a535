//! Admin service - account lifecycle and admin authentication

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, AccountUpdate};
use crate::ports::{AccountStore, RateStore};

/// Privileged lifecycle operations over the account store
///
/// The store itself is the whole state machine; there is no hidden
/// state here.
pub struct AdminService {
    accounts: Arc<dyn AccountStore>,
    rates: Arc<dyn RateStore>,
}

impl AdminService {
    pub fn new(accounts: Arc<dyn AccountStore>, rates: Arc<dyn RateStore>) -> Self {
        Self { accounts, rates }
    }

    /// Insert a fresh account (activated, zero balance, no card)
    ///
    /// The currency must be the rate table's base or listed in it.
    /// Returns the canonical store key.
    pub fn create_account(
        &self,
        username: &str,
        password: &str,
        currency: &str,
        is_admin: bool,
    ) -> Result<String> {
        let key = Account::normalize_key(username);
        let currency = Account::normalize_currency(currency);
        self.rates.load_rates()?.rate(&currency)?;

        let mut book = self.accounts.load_snapshot()?;
        if book.contains_key(&key) {
            return Err(Error::AccountExists(key));
        }
        book.insert(key.clone(), Account::new(password, &currency, is_admin));
        self.accounts.save_snapshot(&book)?;
        Ok(key)
    }

    /// Remove an account unconditionally (hard delete)
    pub fn delete_account(&self, username: &str) -> Result<String> {
        let key = Account::normalize_key(username);
        let mut book = self.accounts.load_snapshot()?;
        if book.remove(&key).is_none() {
            return Err(Error::not_found(&key));
        }
        self.accounts.save_snapshot(&book)?;
        Ok(key)
    }

    /// Allow the account to log in again
    pub fn activate_account(&self, username: &str) -> Result<String> {
        self.set_activation(username, true)
    }

    /// Block non-admin logins for the account
    pub fn deactivate_account(&self, username: &str) -> Result<String> {
        self.set_activation(username, false)
    }

    fn set_activation(&self, username: &str, activated: bool) -> Result<String> {
        let key = Account::normalize_key(username);
        let mut book = self.accounts.load_snapshot()?;
        let account = book.get_mut(&key).ok_or_else(|| Error::not_found(&key))?;
        account.activated = activated;
        self.accounts.save_snapshot(&book)?;
        Ok(key)
    }

    /// Apply a set of field updates to an account
    pub fn change_details(&self, username: &str, updates: &[AccountUpdate]) -> Result<String> {
        let key = Account::normalize_key(username);
        let mut book = self.accounts.load_snapshot()?;
        let account = book.get_mut(&key).ok_or_else(|| Error::not_found(&key))?;
        for update in updates {
            update.apply(account);
        }
        self.accounts.save_snapshot(&book)?;
        Ok(key)
    }

    /// Gate for the admin control surface: verbatim password match on a
    /// record flagged admin. No lockout, unlimited attempts.
    pub fn authenticate_admin(&self, username: &str, password: &str) -> Result<()> {
        let key = Account::normalize_key(username);
        let book = self.accounts.load_snapshot()?;
        match book.get(&key) {
            Some(account) if account.password == password && account.is_admin => Ok(()),
            _ => Err(Error::AuthFailed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::RateTable;
    use rust_decimal::Decimal;

    fn service() -> (Arc<MemoryStore>, AdminService) {
        let mut table = RateTable::empty("USD");
        table.rates.insert("EUR".to_string(), Decimal::new(9, 1));
        let store = Arc::new(MemoryStore::new(table));
        let service = AdminService::new(store.clone(), store.clone());
        (store, service)
    }

    #[test]
    fn test_create_account_normalizes_key_and_currency() {
        let (store, service) = service();
        let key = service.create_account("alice", "pw", "usd", false).unwrap();
        assert_eq!(key, "ALICE");

        let book = store.load_snapshot().unwrap();
        let account = &book["ALICE"];
        assert_eq!(account.currency, "USD");
        assert_eq!(account.balance, Decimal::ZERO);
        assert!(account.activated);
        assert!(!account.is_admin);
        assert!(account.card.is_none());
    }

    #[test]
    fn test_create_duplicate_fails_any_case() {
        let (_, service) = service();
        service.create_account("alice", "pw", "USD", false).unwrap();
        assert!(matches!(
            service.create_account("Alice", "other", "EUR", false),
            Err(Error::AccountExists(key)) if key == "ALICE"
        ));
    }

    #[test]
    fn test_create_with_unknown_currency_fails() {
        let (store, service) = service();
        assert!(matches!(
            service.create_account("bob", "pw", "XYZ", false),
            Err(Error::UnknownCurrency(_))
        ));
        assert!(store.load_snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_delete_account() {
        let (store, service) = service();
        service.create_account("alice", "pw", "USD", false).unwrap();
        service.delete_account("ALICE").unwrap();
        assert!(store.load_snapshot().unwrap().is_empty());
        assert!(matches!(
            service.delete_account("alice"),
            Err(Error::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_activation_flip() {
        let (store, service) = service();
        service.create_account("alice", "pw", "USD", false).unwrap();

        service.deactivate_account("alice").unwrap();
        assert!(!store.load_snapshot().unwrap()["ALICE"].activated);

        service.activate_account("alice").unwrap();
        assert!(store.load_snapshot().unwrap()["ALICE"].activated);

        assert!(matches!(
            service.activate_account("ghost"),
            Err(Error::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_change_details() {
        let (store, service) = service();
        service.create_account("alice", "pw", "USD", false).unwrap();

        let updates = vec![
            AccountUpdate::SetPassword("newpw".to_string()),
            AccountUpdate::SetBalance(Decimal::new(4200, 2)),
            AccountUpdate::SetAdminFlag(true),
        ];
        service.change_details("alice", &updates).unwrap();

        let book = store.load_snapshot().unwrap();
        let account = &book["ALICE"];
        assert_eq!(account.password, "newpw");
        assert_eq!(account.balance, Decimal::new(4200, 2));
        assert!(account.is_admin);
    }

    #[test]
    fn test_authenticate_admin() {
        let (_, service) = service();
        service.create_account("root", "s3cret", "USD", true).unwrap();
        service.create_account("alice", "pw", "USD", false).unwrap();

        assert!(service.authenticate_admin("root", "s3cret").is_ok());
        assert!(matches!(
            service.authenticate_admin("root", "wrong"),
            Err(Error::AuthFailed)
        ));
        // Correct password on a non-admin record still fails
        assert!(matches!(
            service.authenticate_admin("alice", "pw"),
            Err(Error::AuthFailed)
        ));
        assert!(matches!(
            service.authenticate_admin("ghost", "pw"),
            Err(Error::AuthFailed)
        ));
    }
}
