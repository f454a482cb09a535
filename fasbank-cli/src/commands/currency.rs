//! Currency command - convert the account balance into another currency

use anyhow::Result;
use dialoguer::Input;

use super::{get_context, print_json, require_account};
use crate::output;
use fasbank_core::OperationResult;

pub fn run(code: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let account = require_account(&ctx)?;

    let code = match code {
        Some(c) => c,
        None => Input::new()
            .with_prompt("New currency (3-letter code)")
            .interact_text()?,
    };

    let result = ctx.ledger_service.change_currency(&account, &code);

    if json {
        return print_json(&OperationResult::from(result));
    }

    let change = result?;
    if change.old_currency == change.new_currency {
        output::info(&format!("Already using {}", change.new_currency));
    } else {
        output::success(&format!(
            "Currency changed from {} to {}. New balance: {} {}",
            change.old_currency, change.new_currency, change.balance, change.new_currency
        ));
    }
    Ok(())
}
