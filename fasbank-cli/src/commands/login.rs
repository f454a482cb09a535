//! Login command

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::{get_context, get_logger, log_event};
use fasbank_core::services::LogEvent;

pub fn run(username: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    match ctx.session_service.login(&username, &password) {
        Ok(session) => {
            log_event(&logger, LogEvent::new("login_succeeded").with_command("login"));
            println!("{}", format!("Welcome, {}!", session.account).green());
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("login_failed")
                    .with_command("login")
                    .with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}
