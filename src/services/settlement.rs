//! Settlement planning
//!
//! Turns net balances into payment instructions with a two-pointer sweep:
//! creditors and debtors are kept in the order the balances arrive in (the
//! ledger's person order) and the current debtor pays the current creditor
//! the smaller of the two outstanding amounts, until one list runs out.
//!
//! The sweep is a heuristic. It does not look for the minimum number of
//! transactions, and its pairings depend entirely on the input order.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::balance::{calculate_balances, BalanceSheet};
use crate::error::TallyResult;
use crate::models::{Ledger, Money};

/// A recommended payment from one person to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: String,
    pub to: String,
    pub amount: Money,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}

/// Balances together with the transactions that settle them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settlement {
    pub balances: BalanceSheet,
    pub transactions: Vec<Transaction>,
}

impl Settlement {
    /// Sum of all transaction amounts
    pub fn total_transferred(&self) -> Money {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

/// Plans settling transactions from net balances
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Plan transactions for `(person, balance)` pairs
    ///
    /// Balances are expected to sum to zero. If they don't, the sweep stops as
    /// soon as either side runs out and the rest stays unsettled; no error is
    /// raised.
    pub fn plan<I, S>(&self, balances: I) -> Vec<Transaction>
    where
        I: IntoIterator<Item = (S, Money)>,
        S: AsRef<str>,
    {
        let mut creditors: Vec<(String, Money)> = Vec::new();
        let mut debtors: Vec<(String, Money)> = Vec::new();

        for (person, balance) in balances {
            if balance.is_positive() {
                creditors.push((person.as_ref().to_string(), balance));
            } else if balance.is_negative() {
                debtors.push((person.as_ref().to_string(), balance.abs()));
            }
        }

        let mut transactions = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < creditors.len() && j < debtors.len() {
            let amount = creditors[i].1.min(debtors[j].1);

            if amount.is_positive() {
                transactions.push(Transaction {
                    from: debtors[j].0.clone(),
                    to: creditors[i].0.clone(),
                    amount,
                });
            }

            creditors[i].1 -= amount;
            debtors[j].1 -= amount;

            // Both cursors may move on an exact tie
            if !creditors[i].1.is_positive() {
                i += 1;
            }
            if !debtors[j].1.is_positive() {
                j += 1;
            }
        }

        debug!(
            creditors = creditors.len(),
            debtors = debtors.len(),
            transactions = transactions.len(),
            "planned settlement"
        );

        transactions
    }

    /// Calculate balances for a ledger and plan their settlement
    pub fn settle(&self, ledger: &Ledger) -> TallyResult<Settlement> {
        let balances = calculate_balances(ledger)?;
        let transactions = self.plan(balances.balances());
        Ok(Settlement {
            balances,
            transactions,
        })
    }
}
