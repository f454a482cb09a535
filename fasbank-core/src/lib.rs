//! Fasbank Core - Business logic for a single-user, file-backed bank
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (Account, Card, RateTable, Session)
//! - **ports**: Trait definitions for external dependencies (stores, rate fetcher)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (JSON files, in-memory, apilayer HTTP)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::json_file::JsonStore;
use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    parse_amount, Account, AccountBook, AccountUpdate, Card, CardKind, RateTable, Session,
};

/// Main context for bank operations
///
/// This is the primary entry point for all business logic. It holds
/// the configuration, the file store, and all services.
pub struct BankContext {
    pub config: Config,
    pub store: Arc<JsonStore>,
    pub ledger_service: LedgerService,
    pub card_service: CardService,
    pub admin_service: AdminService,
    pub session_service: SessionService,
    pub rate_service: RateService,
}

impl BankContext {
    /// Create a new bank context rooted at a data directory
    ///
    /// Seeds the default admin account and a logged-out session on
    /// first run.
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let store = Arc::new(JsonStore::new(data_dir, &config.base_currency)?);
        store.ensure_seeded()?;

        let accounts: Arc<dyn ports::AccountStore> = store.clone();
        let sessions: Arc<dyn ports::SessionStore> = store.clone();
        let rates: Arc<dyn ports::RateStore> = store.clone();

        let ledger_service = LedgerService::new(accounts.clone(), rates.clone());
        let card_service = CardService::new(accounts.clone());
        let admin_service = AdminService::new(accounts.clone(), rates.clone());
        let session_service = SessionService::new(accounts, sessions);
        let rate_service = RateService::new(rates);

        Ok(Self {
            config,
            store,
            ledger_service,
            card_service,
            admin_service,
            session_service,
            rate_service,
        })
    }
}
