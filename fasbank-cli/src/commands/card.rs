//! Card command - register, remove, show the account's card

use anyhow::Result;
use clap::Subcommand;
use dialoguer::{Confirm, Input};

use super::{get_context, print_json, require_account};
use crate::output;
use fasbank_core::services::CardDraft;
use fasbank_core::OperationResult;

#[derive(Subcommand)]
pub enum CardCommands {
    /// Register a card (at most one per account)
    Register {
        /// Card number (digits only)
        #[arg(long)]
        number: Option<String>,
        /// Expiration (MM/YY)
        #[arg(long)]
        expiration: Option<String>,
        /// Card brand (VISA/MC/...), defaults to VISA
        #[arg(long)]
        brand: Option<String>,
        /// CREDIT or DEBIT, defaults to CREDIT
        #[arg(long)]
        kind: Option<String>,
        /// CVC
        #[arg(long)]
        cvc: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove the registered card
    Remove {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
    /// Show the registered card
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: CardCommands) -> Result<()> {
    match command {
        CardCommands::Register {
            number,
            expiration,
            brand,
            kind,
            cvc,
            json,
        } => run_register(number, expiration, brand, kind, cvc, json),
        CardCommands::Remove { force } => run_remove(force),
        CardCommands::Show { json } => run_show(json),
    }
}

fn run_register(
    number: Option<String>,
    expiration: Option<String>,
    brand: Option<String>,
    kind: Option<String>,
    cvc: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let account = require_account(&ctx)?;

    let number = match number {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Card number (digits only)")
            .interact_text()?,
    };
    let expiration = match expiration {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Expiration (MM/YY)")
            .interact_text()?,
    };
    let brand = match brand {
        Some(b) => b,
        None => Input::new()
            .with_prompt("Card brand (VISA/MC/...)")
            .allow_empty(true)
            .interact_text()?,
    };
    let kind = match kind {
        Some(k) => k,
        None => Input::new()
            .with_prompt("Type (CREDIT/DEBIT)")
            .allow_empty(true)
            .interact_text()?,
    };
    let cvc = match cvc {
        Some(c) => c,
        None => Input::new().with_prompt("CVC").interact_text()?,
    };

    let draft = CardDraft {
        number,
        expiration,
        brand,
        kind,
        cvc,
    };
    let result = ctx.card_service.register(&account, draft);

    if json {
        return print_json(&OperationResult::from(result));
    }

    result?;
    output::success("Card registered");
    Ok(())
}

fn run_remove(force: bool) -> Result<()> {
    let ctx = get_context()?;
    let account = require_account(&ctx)?;

    if !force
        && !Confirm::new()
            .with_prompt("Remove the registered card?")
            .default(false)
            .interact()?
    {
        output::info("Cancelled");
        return Ok(());
    }

    ctx.card_service.unregister(&account)?;
    output::success("Card unregistered");
    Ok(())
}

fn run_show(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let account = require_account(&ctx)?;

    let result = ctx.card_service.view(&account);

    if json {
        return print_json(&OperationResult::from(result));
    }

    match result? {
        Some(card) => {
            let mut table = output::create_table();
            table.add_row(vec!["Brand", &card.brand]);
            table.add_row(vec!["Type", card.kind.as_str()]);
            table.add_row(vec!["Number", &card.number.to_string()]);
            table.add_row(vec!["Expiration", &card.expiration]);
            table.add_row(vec!["CVC", &card.cvc.to_string()]);
            println!("{table}");
        }
        None => output::info("No card registered"),
    }
    Ok(())
}
