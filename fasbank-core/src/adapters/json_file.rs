//! JSON file store - whole-file persistence in a data directory
//!
//! Implements all three store ports over three JSON files:
//! `accounts.json`, `session.json`, `rates.json`. Reads and writes are
//! always whole-file; there is no locking and no append model, matching
//! the single-process scope of the application.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{Account, AccountBook, RateTable, Session};
use crate::ports::{AccountStore, RateStore, SessionStore};

/// Key of the administrator account seeded on first run
pub const DEFAULT_ADMIN_USER: &str = "ADMIN";
/// Password of the seeded administrator account (stored in plaintext)
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin000";

const ACCOUNTS_FILE: &str = "accounts.json";
const SESSION_FILE: &str = "session.json";
const RATES_FILE: &str = "rates.json";

/// File-backed store rooted at a data directory
pub struct JsonStore {
    dir: PathBuf,
    base_currency: String,
}

impl JsonStore {
    /// Open a store, creating the data directory if needed
    pub fn new(dir: &Path, base_currency: &str) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            base_currency: Account::normalize_currency(base_currency),
        })
    }

    /// Seed the default admin account and a logged-out session when the
    /// respective files do not exist yet. Idempotent.
    pub fn ensure_seeded(&self) -> Result<()> {
        let accounts = self.dir.join(ACCOUNTS_FILE);
        if !accounts.exists() {
            let mut book = BTreeMap::new();
            book.insert(
                DEFAULT_ADMIN_USER.to_string(),
                Account::new(DEFAULT_ADMIN_PASSWORD, &self.base_currency, true),
            );
            write_json(&accounts, &book)?;
        }

        let session = self.dir.join(SESSION_FILE);
        if !session.exists() {
            write_json(&session, &Session::logged_out())?;
        }

        Ok(())
    }

    /// The data directory this store is rooted at
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AccountStore for JsonStore {
    fn load_snapshot(&self) -> Result<AccountBook> {
        read_json(&self.dir.join(ACCOUNTS_FILE))
    }

    fn save_snapshot(&self, book: &AccountBook) -> Result<()> {
        write_json(&self.dir.join(ACCOUNTS_FILE), book)
    }
}

impl SessionStore for JsonStore {
    fn load_session(&self) -> Result<Session> {
        read_json(&self.dir.join(SESSION_FILE))
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        write_json(&self.dir.join(SESSION_FILE), session)
    }
}

impl RateStore for JsonStore {
    /// A missing rates file loads as an empty table over the base
    /// currency; conversions then fail until a refresh runs.
    fn load_rates(&self) -> Result<RateTable> {
        let path = self.dir.join(RATES_FILE);
        if !path.exists() {
            return Ok(RateTable::empty(&self.base_currency));
        }
        read_json(&path)
    }

    fn save_rates(&self, table: &RateTable) -> Result<()> {
        write_json(&self.dir.join(RATES_FILE), table)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}
