//! Store ports - persistence abstraction

use crate::domain::result::Result;
use crate::domain::{AccountBook, RateTable, Session};

/// Account store abstraction
///
/// Whole-snapshot semantics: every mutation loads the full book, mutates
/// it in memory, and saves the full book back. No partial updates are
/// ever visible mid-operation. Backends (file, in-memory) implement this
/// trait so ledger/admin logic never touches storage directly.
pub trait AccountStore: Send + Sync {
    /// Load the full account book
    fn load_snapshot(&self) -> Result<AccountBook>;

    /// Replace the persisted account book with the given one
    fn save_snapshot(&self, book: &AccountBook) -> Result<()>;
}

/// Session store abstraction (singleton record)
pub trait SessionStore: Send + Sync {
    fn load_session(&self) -> Result<Session>;
    fn save_session(&self, session: &Session) -> Result<()>;
}

/// Rate table store abstraction
///
/// The core only reads the table; `save_rates` exists for the external
/// refresh job.
pub trait RateStore: Send + Sync {
    fn load_rates(&self) -> Result<RateTable>;
    fn save_rates(&self, table: &RateTable) -> Result<()>;
}

/// Upstream source of fresh exchange rates
pub trait RateFetcher {
    fn fetch(&self) -> Result<RateTable>;
}
