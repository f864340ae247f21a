//! Service layer for Tally
//!
//! The service layer holds the accounting logic on top of the ledger model:
//! balance calculation and settlement planning. Both are pure functions of
//! the ledger's current state.

pub mod balance;
pub mod settlement;

pub use balance::{calculate_balances, BalanceCalculator, BalanceSheet, PersonAmounts};
pub use settlement::{Settlement, SettlementPlanner, Transaction};
