//! Withdraw command

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
            .with_prompt("Amount to withdraw")
            .interact_text()?,
    };

    let result = parse_amount(&amount_str)
        .and_then(|amount| ctx.ledger_service.withdraw(&account, amount));
    match &result {
        Ok(_) => log_event(&logger, LogEvent::new("withdraw").with_command("withdraw")),
        Err(e) => log_event(
            &logger,
            LogEvent::new("withdraw_failed")
                .with_command("withdraw")
                .with_error(e.to_string()),
        ),
    }

    if json {
        return print_json(&OperationResult::from(result));
    }

    let view = result?;
    output::success(&format!(
        "Withdrawal successful. New balance: {} {}",
        view.balance, view.currency
    ));
    Ok(())
}
