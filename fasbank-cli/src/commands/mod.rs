//! CLI command implementations

pub mod admin;
pub mod balance;
pub mod card;
pub mod currency;
pub mod deposit;
pub mod login;
pub mod logout;
pub mod logs;
pub mod rates;
pub mod withdraw;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use fasbank_core::services::{LogEvent, LoggingService};
use fasbank_core::{BankContext, OperationResult};

/// Get the data directory from environment or default
pub fn get_bank_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FASBANK_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fasbank")
    }
}

/// Get or create the bank context
pub fn get_context() -> Result<BankContext> {
    let bank_dir = get_bank_dir();
    BankContext::new(&bank_dir)
        .with_context(|| format!("Failed to initialize bank data directory: {:?}", bank_dir))
}

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    LoggingService::new(&get_bank_dir(), env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// The account key of the active session, or an error telling the user
/// to log in
pub fn require_account(ctx: &BankContext) -> Result<String> {
    let session = ctx.session_service.current()?;
    match session.account_key() {
        Some(key) => Ok(key.to_string()),
        None => bail!("Not logged in. Run `fas login` first"),
    }
}

/// Print the success/data/error envelope for --json mode
pub fn print_json<T: Serialize>(result: &OperationResult<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
