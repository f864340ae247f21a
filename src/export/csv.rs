//! CSV Export functionality
//!
//! Exports the settlement plan or the per-person balances as CSV for
//! spreadsheets.

use std::io::Write;

use crate::error::{TallyError, TallyResult};
use crate::export::json::balance_rows;
use crate::models::Ledger;
use crate::services::SettlementPlanner;

/// Export the settling transactions (from, to, amount) to CSV
pub fn export_transactions_csv<W: Write>(ledger: &Ledger, writer: W) -> TallyResult<()> {
    let settlement = SettlementPlanner.settle(ledger)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    if settlement.transactions.is_empty() {
        csv_writer
            .write_record(["from", "to", "amount"])
            .map_err(|e| TallyError::Export(e.to_string()))?;
    }
    for transaction in &settlement.transactions {
        csv_writer
            .serialize(transaction)
            .map_err(|e| TallyError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TallyError::Export(e.to_string()))
}

/// Export paid / received / owed / balance per person to CSV
pub fn export_balances_csv<W: Write>(ledger: &Ledger, writer: W) -> TallyResult<()> {
    let settlement = SettlementPlanner.settle(ledger)?;
    let rows = balance_rows(&settlement);

    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer
            .write_record(["person", "paid", "received", "owed", "balance"])
            .map_err(|e| TallyError::Export(e.to_string()))?;
    }
    for row in &rows {
        csv_writer
            .serialize(row)
            .map_err(|e| TallyError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TallyError::Export(e.to_string()))
}
