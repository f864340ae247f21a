//! Expense model
//!
//! An expense is one payer covering a cost that is split evenly across the
//! current members of a named group.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A shared cost paid by one person and split across a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Person who paid
    #[serde(rename = "person")]
    pub payer: String,

    /// Amount paid (must be positive)
    pub amount: Money,

    /// Name of the group the cost is split across
    pub group: String,

    /// What the money was spent on
    #[serde(default)]
    pub subject: String,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        payer: impl Into<String>,
        amount: impl Into<Money>,
        group: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            payer: payer.into(),
            amount: amount.into(),
            group: group.into(),
            subject: subject.into(),
        }
    }

    /// Validate the record on its own, without looking at the ledger
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.payer.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyPayer);
        }

        if self.group.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyGroup);
        }

        if !self.amount.is_finite() || !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount.value()));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} paid {} for {} (group '{}')",
            self.payer, self.amount, self.subject, self.group
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    EmptyPayer,
    EmptyGroup,
    NonPositiveAmount(f64),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayer => write!(f, "Expense payer cannot be empty"),
            Self::EmptyGroup => write!(f, "Expense group cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
