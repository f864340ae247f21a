//! Balance, settlement and report commands
//!
//! These only read the ledger. Calculation errors (an expense split across an
//! empty or unknown group, an unknown person) surface as validation errors.

use std::path::PathBuf;

use tracing::info;

use crate::config::Settings;
use crate::display::{build_summary, format_balance_table, format_transactions};
use crate::error::TallyResult;
use crate::services::{calculate_balances, SettlementPlanner};
use crate::storage::{write_text_atomic, Storage};

/// Print the per-person balance table
pub fn handle_balance_command(storage: &Storage, settings: &Settings) -> TallyResult<()> {
    let sheet = calculate_balances(storage.ledger())?;
    println!("{}", format_balance_table(&sheet, settings.display_precision));
    Ok(())
}

/// Print the transactions that settle all balances
pub fn handle_settle_command(storage: &Storage, settings: &Settings) -> TallyResult<()> {
    let settlement = SettlementPlanner.settle(storage.ledger())?;
    println!(
        "{}",
        format_transactions(&settlement.transactions, settings.display_precision)
    );
    Ok(())
}

/// Print the full summary, or save it to `output`
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    output: Option<PathBuf>,
) -> TallyResult<()> {
    let ledger = storage.ledger();
    let settlement = SettlementPlanner.settle(ledger)?;
    let summary = build_summary(ledger, &settlement, settings.display_precision);

    match output {
        Some(path) => {
            write_text_atomic(&path, &summary)?;
            info!(path = %path.display(), "saved report");
            println!("Report saved to: {}", path.display());
        }
        None => print!("{}", summary),
    }

    Ok(())
}
