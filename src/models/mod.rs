//! Core data models for Tally
//!
//! This module contains the data structures of the shared-expense domain:
//! the ledger of persons and groups, expenses, prepayments and amounts.

pub mod expense;
pub mod ledger;
pub mod money;
pub mod prepayment;

pub use expense::{Expense, ExpenseValidationError};
pub use ledger::{Groups, Ledger};
pub use money::{Money, MoneyParseError};
pub use prepayment::{Prepayment, PrepaymentValidationError};
