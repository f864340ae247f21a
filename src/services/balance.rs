//! Balance calculation
//!
//! Derives, for every person in the ledger, how much they paid, how much they
//! received, how much they owe from group splits, and their net balance.
//! Nothing is cached: every call recomputes from the current ledger.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{TallyError, TallyResult};
use crate::models::{Ledger, Money};

/// Person name -> amount, in the ledger's person order
pub type PersonAmounts = IndexMap<String, Money>;

/// Paid / received / owed / balance per person
///
/// All four maps hold an entry for every person in the ledger, so lookups
/// through the accessor methods never miss for known persons; unknown names
/// read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BalanceSheet {
    /// Expenses logged plus prepayments made
    pub paid: PersonAmounts,
    /// Prepayments received
    pub received: PersonAmounts,
    /// Sum of per-head shares across all expenses
    pub owed: PersonAmounts,
    /// paid - received - owed
    pub balance: PersonAmounts,
}

impl BalanceSheet {
    pub fn paid_by(&self, person: &str) -> Money {
        amount_or_zero(&self.paid, person)
    }

    pub fn received_by(&self, person: &str) -> Money {
        amount_or_zero(&self.received, person)
    }

    pub fn owed_by(&self, person: &str) -> Money {
        amount_or_zero(&self.owed, person)
    }

    pub fn balance_of(&self, person: &str) -> Money {
        amount_or_zero(&self.balance, person)
    }

    /// Net balances in person order
    pub fn balances(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.balance.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    /// Sum of all balances; zero up to floating-point drift
    pub fn net_total(&self) -> Money {
        self.balance.values().copied().sum()
    }

    /// Sum of all positive balances (what creditors are owed)
    pub fn total_credit(&self) -> Money {
        self.balance
            .values()
            .copied()
            .filter(Money::is_positive)
            .sum()
    }
}

fn amount_or_zero(map: &PersonAmounts, person: &str) -> Money {
    map.get(person).copied().unwrap_or_default()
}

/// Computes balance sheets from a ledger
pub struct BalanceCalculator<'a> {
    ledger: &'a Ledger,
}

impl<'a> BalanceCalculator<'a> {
    /// Create a calculator over the given ledger
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Calculate the balance sheet
    ///
    /// The ledger is validated first: every expense must split across an
    /// existing, non-empty group, and every name on a record must be a known
    /// person. A ledger that fails validation yields `TallyError::Validation`
    /// instead of a sheet with undefined shares.
    pub fn calculate(&self) -> TallyResult<BalanceSheet> {
        self.ledger.validate()?;

        let zeroed: PersonAmounts = self
            .ledger
            .persons()
            .iter()
            .map(|p| (p.clone(), Money::zero()))
            .collect();

        let mut paid = zeroed.clone();
        let mut received = zeroed.clone();
        let mut owed = zeroed;

        for expense in self.ledger.expenses() {
            let members = self
                .ledger
                .group(&expense.group)
                .ok_or_else(|| TallyError::group_not_found(&expense.group))?;

            *paid.entry(expense.payer.clone()).or_default() += expense.amount;

            let per_head = expense.amount.split(members.len());
            for member in members {
                *owed.entry(member.clone()).or_default() += per_head;
            }
        }

        for prepayment in self.ledger.prepayments() {
            *paid.entry(prepayment.payer.clone()).or_default() += prepayment.amount;
            *received.entry(prepayment.recipient.clone()).or_default() += prepayment.amount;
        }

        let balance: PersonAmounts = self
            .ledger
            .persons()
            .iter()
            .map(|p| {
                let net = amount_or_zero(&paid, p) - amount_or_zero(&received, p)
                    - amount_or_zero(&owed, p);
                (p.clone(), net)
            })
            .collect();

        debug!(
            persons = balance.len(),
            expenses = self.ledger.expenses().len(),
            prepayments = self.ledger.prepayments().len(),
            "calculated balances"
        );

        Ok(BalanceSheet {
            paid,
            received,
            owed,
            balance,
        })
    }
}

/// Calculate the balance sheet for a ledger
pub fn calculate_balances(ledger: &Ledger) -> TallyResult<BalanceSheet> {
    BalanceCalculator::new(ledger).calculate()
}
