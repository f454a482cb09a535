//! Deposit command

use anyhow::Result;
use dialoguer::Input;

use super::{get_context, get_logger, log_event, print_json, require_account};
use crate::output;
use fasbank_core::services::LogEvent;
use fasbank_core::{parse_amount, OperationResult};

pub fn run(amount: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let account = require_account(&ctx)?;

    let amount_str = match amount {
        Some(a) => a,
        None => Input::new()
            .with_prompt("Amount to deposit")
            .interact_text()?,
    };

    let result = parse_amount(&amount_str)
        .and_then(|amount| ctx.ledger_service.deposit(&account, amount));
    log_event(&logger, LogEvent::new("deposit").with_command("deposit"));

    if json {
        return print_json(&OperationResult::from(result));
    }

    let view = result?;
    output::success(&format!(
        "Deposit successful. New balance: {} {}",
        view.balance, view.currency
    ));
    Ok(())
}
