//! In-memory store - swappable backend for tests and embedding

use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::{AccountBook, RateTable, Session};
use crate::ports::{AccountStore, RateStore, SessionStore};

/// Store backend that holds all state in memory
///
/// Same whole-snapshot semantics as the file store, without the files.
pub struct MemoryStore {
    accounts: Mutex<AccountBook>,
    session: Mutex<Session>,
    rates: Mutex<RateTable>,
}

impl MemoryStore {
    /// An empty store serving the given rate table
    pub fn new(rates: RateTable) -> Self {
        Self {
            accounts: Mutex::new(AccountBook::new()),
            session: Mutex::new(Session::logged_out()),
            rates: Mutex::new(rates),
        }
    }
}

fn poisoned() -> Error {
    Error::Other("in-memory store lock poisoned".to_string())
}

impl AccountStore for MemoryStore {
    fn load_snapshot(&self) -> Result<AccountBook> {
        Ok(self.accounts.lock().map_err(|_| poisoned())?.clone())
    }

    fn save_snapshot(&self, book: &AccountBook) -> Result<()> {
        *self.accounts.lock().map_err(|_| poisoned())? = book.clone();
        Ok(())
    }
}

impl SessionStore for MemoryStore {
    fn load_session(&self) -> Result<Session> {
        Ok(self.session.lock().map_err(|_| poisoned())?.clone())
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        *self.session.lock().map_err(|_| poisoned())? = session.clone();
        Ok(())
    }
}

impl RateStore for MemoryStore {
    fn load_rates(&self) -> Result<RateTable> {
        Ok(self.rates.lock().map_err(|_| poisoned())?.clone())
    }

    fn save_rates(&self, table: &RateTable) -> Result<()> {
        *self.rates.lock().map_err(|_| poisoned())? = table.clone();
        Ok(())
    }
}
