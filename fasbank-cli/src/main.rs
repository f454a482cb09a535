//! Fasbank CLI - a toy bank in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{admin, balance, card, currency, deposit, login, logout, logs, rates, withdraw};

/// fas - single-user toy banking
#[derive(Parser)]
#[command(name = "fas", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as an account
    Login {
        /// Username
        username: Option<String>,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out of the current session
    Logout,

    /// Show the logged-in account's balance
    Balance {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Deposit money into the logged-in account
    Deposit {
        /// Amount to deposit (prompted when omitted)
        amount: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Withdraw money from the logged-in account
    Withdraw {
        /// Amount to withdraw (prompted when omitted)
        amount: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert the account balance into another currency
    Currency {
        /// New 3-letter currency code (prompted when omitted)
        code: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the account's payment card
    Card {
        #[command(subcommand)]
        command: card::CardCommands,
    },

    /// Administer accounts (requires admin credentials)
    Admin {
        #[command(subcommand)]
        command: admin::AdminCommands,
    },

    /// Show or refresh the exchange-rate table
    Rates {
        #[command(subcommand)]
        command: rates::RatesCommands,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { username, password } => login::run(username, password),
        Commands::Logout => logout::run(),
        Commands::Balance { json } => balance::run(json),
        Commands::Deposit { amount, json } => deposit::run(amount, json),
        Commands::Withdraw { amount, json } => withdraw::run(amount, json),
        Commands::Currency { code, json } => currency::run(code, json),
        Commands::Card { command } => card::run(command),
        Commands::Admin { command } => admin::run(command),
        Commands::Rates { command } => rates::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
