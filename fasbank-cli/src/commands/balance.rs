//! Balance command - show the logged-in account's balance

use anyhow::Result;
use colored::Colorize;

use super::{get_context, print_json, require_account};
use fasbank_core::OperationResult;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let account = require_account(&ctx)?;

    let result = ctx.ledger_service.view_balance(&account);

    if json {
        return print_json(&OperationResult::from(result));
    }

    let view = result?;
    println!("{}", view.account.bold());
    println!("Balance: {} {}", view.balance, view.currency);
    Ok(())
}
