//! Logs command - view and manage application logs

use anyhow::Result;
use chrono::{TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use super::get_bank_dir;
use crate::output;
use fasbank_core::services::LoggingService;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Show log statistics and file path
    Stats,
}

fn get_logging_service() -> Result<LoggingService> {
    Ok(LoggingService::new(
        &get_bank_dir(),
        env!("CARGO_PKG_VERSION"),
    )?)
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

pub fn run(command: LogsCommands) -> Result<()> {
    let service = get_logging_service()?;

    match command {
        LogsCommands::List { limit, errors, json } => {
            let entries = if errors {
                service.get_errors(limit)?
            } else {
                service.get_recent(limit)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }
            if entries.is_empty() {
                output::info("No log entries");
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Time", "Event", "Command", "Error"]);
            for entry in entries {
                table.add_row(vec![
                    format_timestamp(entry.timestamp),
                    entry.event,
                    entry.command.unwrap_or_default(),
                    entry.error_message.unwrap_or_default(),
                ]);
            }
            println!("{table}");
            Ok(())
        }

        LogsCommands::Clear { older_than_days, force } => {
            if !force
                && !Confirm::new()
                    .with_prompt(format!(
                        "Delete log entries older than {older_than_days} days?"
                    ))
                    .default(false)
                    .interact()?
            {
                output::info("Cancelled");
                return Ok(());
            }

            let cutoff_ms = Utc::now().timestamp_millis() - (older_than_days as i64) * 86_400_000;
            let deleted = service.delete_before(cutoff_ms)?;
            output::success(&format!("Deleted {deleted} log entries"));
            Ok(())
        }

        LogsCommands::Stats => {
            println!("{}", "Log statistics".bold());
            println!("Entries: {}", service.count()?);
            println!("File: {}", service.path().display());
            Ok(())
        }
    }
}
