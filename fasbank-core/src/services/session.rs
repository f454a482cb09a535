//! Session service - login, logout, current session

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, Session};
use crate::ports::{AccountStore, SessionStore};

/// Authentication gate over the singleton session record
pub struct SessionService {
    accounts: Arc<dyn AccountStore>,
    sessions: Arc<dyn SessionStore>,
}

impl SessionService {
    pub fn new(accounts: Arc<dyn AccountStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { accounts, sessions }
    }

    /// Authenticate and overwrite the session
    ///
    /// Succeeds when the password matches and the account is activated
    /// or an admin. All failures collapse into one `AuthFailed`; the
    /// prior session is left untouched on failure.
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        let key = Account::normalize_key(username);
        let book = self.accounts.load_snapshot()?;
        let account = book.get(&key).ok_or(Error::AuthFailed)?;
        if account.password != password {
            return Err(Error::AuthFailed);
        }
        if !account.activated && !account.is_admin {
            return Err(Error::AuthFailed);
        }

        let session = Session::for_account(key);
        self.sessions.save_session(&session)?;
        Ok(session)
    }

    /// Reset the session unconditionally
    pub fn logout(&self) -> Result<Session> {
        let session = Session::logged_out();
        self.sessions.save_session(&session)?;
        Ok(session)
    }

    /// The persisted session
    pub fn current(&self) -> Result<Session> {
        self.sessions.load_session()
    }
}
