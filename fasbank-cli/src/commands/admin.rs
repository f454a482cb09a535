//! Admin command - account lifecycle, gated by admin credentials

use anyhow::Result;
use clap::Subcommand;
use dialoguer::{Confirm, Input, Password};

use super::{get_context, get_logger, log_event, print_json};
use crate::output;
use fasbank_core::services::LogEvent;
use fasbank_core::{AccountUpdate, BankContext, OperationResult};

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Create a new account
    Create {
        /// Username
        username: String,
        /// Password for the new account (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Default currency (3-letter code)
        #[arg(long, default_value = "USD")]
        currency: String,
        /// Grant admin privileges
        #[arg(long)]
        admin: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an account
    Delete {
        /// Username to delete
        username: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Allow an account to log in
    Activate {
        username: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Block an account from logging in
    Deactivate {
        username: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a single account field (password, currency, balance, is_admin)
    Update {
        /// Username to change
        username: String,
        /// Field to change
        field: String,
        /// New value
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Every admin action authenticates first; attempts are not limited
fn authenticate(ctx: &BankContext) -> Result<()> {
    let username: String = Input::new().with_prompt("Admin username").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;
    let logger = get_logger();

    match ctx.admin_service.authenticate_admin(&username, &password) {
        Ok(()) => Ok(()),
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("admin_auth_failed").with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}

pub fn run(command: AdminCommands) -> Result<()> {
    let ctx = get_context()?;
    authenticate(&ctx)?;
    let logger = get_logger();

    match command {
        AdminCommands::Create {
            username,
            password,
            currency,
            admin,
            json,
        } => {
            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt("Password for the new account")
                    .interact()?,
            };
            let result = ctx
                .admin_service
                .create_account(&username, &password, &currency, admin);
            log_event(&logger, LogEvent::new("account_created").with_command("admin create"));

            if json {
                return print_json(&OperationResult::from(result));
            }
            let key = result?;
            output::success(&format!("Account {key} created"));
            Ok(())
        }

        AdminCommands::Delete { username, force, json } => {
            if !force
                && !Confirm::new()
                    .with_prompt(format!("Delete account '{username}'?"))
                    .default(false)
                    .interact()?
            {
                output::info("Cancelled");
                return Ok(());
            }
            let result = ctx.admin_service.delete_account(&username);
            log_event(&logger, LogEvent::new("account_deleted").with_command("admin delete"));

            if json {
                return print_json(&OperationResult::from(result));
            }
            let key = result?;
            output::success(&format!("Account {key} deleted"));
            Ok(())
        }

        AdminCommands::Activate { username, json } => {
            let result = ctx.admin_service.activate_account(&username);
            if json {
                return print_json(&OperationResult::from(result));
            }
            let key = result?;
            output::success(&format!("Account {key} activated"));
            Ok(())
        }

        AdminCommands::Deactivate { username, json } => {
            let result = ctx.admin_service.deactivate_account(&username);
            if json {
                return print_json(&OperationResult::from(result));
            }
            let key = result?;
            output::success(&format!("Account {key} deactivated"));
            Ok(())
        }

        AdminCommands::Update {
            username,
            field,
            value,
            json,
        } => {
            // Unknown fields are silently ignored, matching the store's
            // update semantics
            let result = AccountUpdate::parse(&field, &value).and_then(|update| {
                let updates: Vec<AccountUpdate> = update.into_iter().collect();
                ctx.admin_service.change_details(&username, &updates)
            });
            log_event(&logger, LogEvent::new("account_updated").with_command("admin update"));

            if json {
                return print_json(&OperationResult::from(result));
            }
            let key = result?;
            output::success(&format!("Account {key} updated"));
            Ok(())
        }
    }
}
