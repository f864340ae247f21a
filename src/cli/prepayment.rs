//! Prepayment CLI commands
//!
//! Prepayments are addressed by their 1-based position in
//! `tally prepayment list`.

use clap::Subcommand;

use super::{parse_amount, to_index};
use crate::config::Settings;
use crate::display::format_prepayment_list;
use crate::error::{TallyError, TallyResult};
use crate::models::Prepayment;
use crate::storage::Storage;

/// Prepayment subcommands
#[derive(Subcommand)]
pub enum PrepaymentCommands {
    /// Record money one person handed to another
    Add {
        /// Person who paid
        payer: String,
        /// Amount (e.g., "20" or "20,00")
        amount: String,
        /// Person who received the money
        recipient: String,
    },

    /// Change fields of an existing prepayment
    Edit {
        /// Position as shown by `prepayment list`
        index: usize,
        /// New payer
        #[arg(short, long)]
        payer: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New recipient
        #[arg(short, long)]
        recipient: Option<String>,
    },

    /// Remove a prepayment
    Remove {
        /// Position as shown by `prepayment list`
        index: usize,
    },

    /// List all prepayments
    List,
}

/// Handle a prepayment command
pub fn handle_prepayment_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: PrepaymentCommands,
) -> TallyResult<()> {
    match cmd {
        PrepaymentCommands::Add {
            payer,
            amount,
            recipient,
        } => {
            let prepayment = Prepayment::new(payer, parse_amount(&amount)?, recipient);
            let index = storage
                .ledger_mut()
                .upsert_prepayment(prepayment.clone(), None)?;
            storage.save()?;

            println!("Added prepayment #{}: {}", index + 1, prepayment);
        }

        PrepaymentCommands::Edit {
            index,
            payer,
            amount,
            recipient,
        } => {
            if payer.is_none() && amount.is_none() && recipient.is_none() {
                println!("No changes specified. Use --payer, --amount, or --recipient.");
                return Ok(());
            }

            let i = to_index(index, storage.ledger().prepayments().len())
                .ok_or_else(|| TallyError::prepayment_not_found(index))?;

            let mut prepayment = storage.ledger().prepayments()[i].clone();
            if let Some(payer) = payer {
                prepayment.payer = payer;
            }
            if let Some(amount) = amount {
                prepayment.amount = parse_amount(&amount)?;
            }
            if let Some(recipient) = recipient {
                prepayment.recipient = recipient;
            }

            storage
                .ledger_mut()
                .upsert_prepayment(prepayment.clone(), Some(i))?;
            storage.save()?;

            println!("Updated prepayment #{}: {}", index, prepayment);
        }

        PrepaymentCommands::Remove { index } => {
            let removed = to_index(index, storage.ledger().prepayments().len())
                .and_then(|i| storage.ledger_mut().remove_prepayment(i))
                .ok_or_else(|| TallyError::prepayment_not_found(index))?;
            storage.save()?;

            println!("Removed prepayment #{}: {}", index, removed);
        }

        PrepaymentCommands::List => {
            print!(
                "{}",
                format_prepayment_list(storage.ledger(), settings.display_precision)
            );
            if storage.ledger().prepayments().is_empty() {
                println!();
            }
        }
    }

    Ok(())
}
