//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger and services.

pub mod expense;
pub mod export;
pub mod group;
pub mod person;
pub mod prepayment;
pub mod report;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, handle_import_command, ExportArgs, ExportFormat, ImportArgs};
pub use group::{handle_group_command, GroupCommands};
pub use person::{handle_person_command, PersonCommands};
pub use prepayment::{handle_prepayment_command, PrepaymentCommands};
pub use report::{handle_balance_command, handle_report_command, handle_settle_command};

use crate::error::{TallyError, TallyResult};
use crate::models::Money;

/// Parse an amount argument
pub(crate) fn parse_amount(input: &str) -> TallyResult<Money> {
    Money::parse(input).map_err(|e| TallyError::Validation(e.to_string()))
}

/// Convert a 1-based position to an index into a list of `len` items
pub(crate) fn to_index(position: usize, len: usize) -> Option<usize> {
    position.checked_sub(1).filter(|&i| i < len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_index() {
        assert_eq!(to_index(1, 3), Some(0));
        assert_eq!(to_index(3, 3), Some(2));
        assert_eq!(to_index(0, 3), None);
        assert_eq!(to_index(4, 3), None);
        assert_eq!(to_index(1, 0), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12,50").unwrap(), Money::new(12.5));
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }
}
