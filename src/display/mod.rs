//! Display formatting for terminal output
//!
//! Provides text formatting for ledger listings and the summary report.

pub mod ledger;
pub mod report;

pub use ledger::{
    format_expense_list, format_group_details, format_group_list, format_person_list,
    format_prepayment_list,
};
pub use report::{build_summary, format_balance_table, format_transactions};
