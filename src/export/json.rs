//! JSON Export functionality
//!
//! Exports the ledger together with its computed balances and settlement,
//! under a schema version so exports can be imported back.

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{TallyError, TallyResult};
use crate::models::{Ledger, Money};
use crate::services::{Settlement, SettlementPlanner, Transaction};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One person's computed figures, as exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub person: String,
    pub paid: Money,
    pub received: Money,
    pub owed: Money,
    pub balance: Money,
}

/// Full ledger export structure
///
/// The ledger fields are flattened, so an export is also a valid ledger file
/// with a few extra keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Application version that created the export
    pub app_version: String,

    #[serde(flatten)]
    pub ledger: Ledger,

    /// Computed balances, in person order
    #[serde(default)]
    pub balances: Vec<BalanceRow>,

    /// Computed settling transactions
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl FullExport {
    /// Create a new full export from a ledger
    pub fn from_ledger(ledger: &Ledger) -> TallyResult<Self> {
        let settlement = SettlementPlanner.settle(ledger)?;

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            ledger: ledger.clone(),
            balances: balance_rows(&settlement),
            transactions: settlement.transactions,
        })
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        self.ledger.validate().map_err(|e| e.to_string())
    }
}

/// Flatten a settlement's balance sheet into rows
pub fn balance_rows(settlement: &Settlement) -> Vec<BalanceRow> {
    let sheet = &settlement.balances;
    sheet
        .balances()
        .map(|(person, balance)| BalanceRow {
            person: person.to_string(),
            paid: sheet.paid_by(person),
            received: sheet.received_by(person),
            owed: sheet.owed_by(person),
            balance,
        })
        .collect()
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(ledger: &Ledger, writer: &mut W, pretty: bool) -> TallyResult<()> {
    let export = FullExport::from_ledger(ledger)?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| TallyError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| TallyError::Export(e.to_string()))?;
    Ok(())
}

/// Import a JSON export, returning the ledger it carries
pub fn import_from_json(json_str: &str) -> TallyResult<Ledger> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| TallyError::Validation(e.to_string()))?;

    export.validate().map_err(TallyError::Validation)?;

    Ok(export.ledger)
}
