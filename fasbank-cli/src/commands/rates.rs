//! Rates command - show or refresh the exchange-rate table

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{get_context, get_logger, log_event, print_json};
use crate::output;
use fasbank_core::adapters::apilayer::ApilayerClient;
use fasbank_core::services::LogEvent;
use fasbank_core::OperationResult;

#[derive(Subcommand)]
pub enum RatesCommands {
    /// Show the stored rate table
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch fresh rates from the upstream API and store them
    Refresh {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: RatesCommands) -> Result<()> {
    match command {
        RatesCommands::Show { json } => run_show(json),
        RatesCommands::Refresh { json } => run_refresh(json),
    }
}

fn run_show(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let result = ctx.rate_service.table();

    if json {
        return print_json(&OperationResult::from(result));
    }

    let table = result?;
    println!("{}", format!("Rates (base: {})", table.base).bold());
    if let Some(updated) = table.last_updated {
        println!("Last updated: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if table.rates.is_empty() {
        output::info("No rates stored yet. Run `fas rates refresh`");
        return Ok(());
    }

    let mut out = output::create_table();
    out.set_header(vec!["Currency", "Rate"]);
    for (code, rate) in &table.rates {
        out.add_row(vec![code.clone(), rate.to_string()]);
    }
    println!("{out}");
    Ok(())
}

fn run_refresh(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();

    let result = ApilayerClient::from_env(&ctx.config.rates_url, &ctx.config.base_currency)
        .and_then(|client| ctx.rate_service.refresh(&client));

    match &result {
        Ok(_) => log_event(&logger, LogEvent::new("rates_refreshed").with_command("rates refresh")),
        Err(e) => log_event(
            &logger,
            LogEvent::new("rates_refresh_failed")
                .with_command("rates refresh")
                .with_error(e.to_string()),
        ),
    }

    if json {
        return print_json(&OperationResult::from(result));
    }

    let table = result?;
    output::success(&format!(
        "Stored {} rates against {}",
        table.rates.len(),
        table.base
    ));
    Ok(())
}
