//! Prepayment model
//!
//! A prepayment is a direct payment from one person to another outside of the
//! group split, e.g. money handed to an organizer in advance.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A direct payment between two people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prepayment {
    /// Person who paid
    #[serde(rename = "person")]
    pub payer: String,

    /// Amount paid (must be positive)
    pub amount: Money,

    /// Person who received the money
    pub recipient: String,
}

impl Prepayment {
    /// Create a new prepayment
    pub fn new(
        payer: impl Into<String>,
        amount: impl Into<Money>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            payer: payer.into(),
            amount: amount.into(),
            recipient: recipient.into(),
        }
    }

    /// Validate the record on its own, without looking at the ledger
    pub fn validate(&self) -> Result<(), PrepaymentValidationError> {
        if self.payer.trim().is_empty() {
            return Err(PrepaymentValidationError::EmptyPayer);
        }

        if self.recipient.trim().is_empty() {
            return Err(PrepaymentValidationError::EmptyRecipient);
        }

        if !self.amount.is_finite() || !self.amount.is_positive() {
            return Err(PrepaymentValidationError::NonPositiveAmount(
                self.amount.value(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Prepayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} prepaid {} to {}",
            self.payer, self.amount, self.recipient
        )
    }
}

/// Validation errors for prepayments
#[derive(Debug, Clone, PartialEq)]
pub enum PrepaymentValidationError {
    EmptyPayer,
    EmptyRecipient,
    NonPositiveAmount(f64),
}

impl fmt::Display for PrepaymentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayer => write!(f, "Prepayment payer cannot be empty"),
            Self::EmptyRecipient => write!(f, "Prepayment recipient cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Prepayment amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for PrepaymentValidationError {}
