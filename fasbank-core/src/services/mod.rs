//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod admin;
mod cards;
mod ledger;
pub mod logging;
mod rates;
mod session;

pub use admin::AdminService;
pub use cards::{CardDraft, CardService};
pub use ledger::{BalanceView, CurrencyChange, LedgerService};
pub use logging::{LogEntry, LogEvent, LoggingService};
pub use rates::RateService;
pub use session::SessionService;
