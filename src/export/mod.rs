//! Export module for Tally
//!
//! Provides ledger export in multiple formats:
//! - JSON: the ledger plus computed balances and transactions (importable)
//! - YAML: the same document in a human-readable form (importable)
//! - CSV: the settlement plan or per-person balances (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_balances_csv, export_transactions_csv};
pub use json::{export_full_json, import_from_json, BalanceRow, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
