//! Expense CLI commands
//!
//! Expenses are addressed by their 1-based position in `tally expense list`.

use clap::Subcommand;

use super::{parse_amount, to_index};
use crate::config::Settings;
use crate::display::format_expense_list;
use crate::error::{TallyError, TallyResult};
use crate::models::Expense;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense split evenly across a group
    Add {
        /// Person who paid
        payer: String,
        /// Amount (e.g., "42.50" or "42,50")
        amount: String,
        /// Group the cost is split across
        group: String,
        /// What the money was spent on
        subject: String,
    },

    /// Change fields of an existing expense
    Edit {
        /// Position as shown by `expense list`
        index: usize,
        /// New payer
        #[arg(short, long)]
        payer: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New group
        #[arg(short, long)]
        group: Option<String>,
        /// New subject
        #[arg(short, long)]
        subject: Option<String>,
    },

    /// Remove an expense
    Remove {
        /// Position as shown by `expense list`
        index: usize,
    },

    /// List all expenses
    List,
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TallyResult<()> {
    let precision = settings.display_precision;

    match cmd {
        ExpenseCommands::Add {
            payer,
            amount,
            group,
            subject,
        } => {
            let expense = Expense::new(payer, parse_amount(&amount)?, group, subject);
            let index = storage.ledger_mut().upsert_expense(expense.clone(), None)?;
            storage.save()?;

            println!("Added expense #{}: {}", index + 1, expense);
        }

        ExpenseCommands::Edit {
            index,
            payer,
            amount,
            group,
            subject,
        } => {
            if payer.is_none() && amount.is_none() && group.is_none() && subject.is_none() {
                println!("No changes specified. Use --payer, --amount, --group, or --subject.");
                return Ok(());
            }

            let i = to_index(index, storage.ledger().expenses().len())
                .ok_or_else(|| TallyError::expense_not_found(index))?;

            let mut expense = storage.ledger().expenses()[i].clone();
            if let Some(payer) = payer {
                expense.payer = payer;
            }
            if let Some(amount) = amount {
                expense.amount = parse_amount(&amount)?;
            }
            if let Some(group) = group {
                expense.group = group;
            }
            if let Some(subject) = subject {
                expense.subject = subject;
            }

            storage.ledger_mut().upsert_expense(expense.clone(), Some(i))?;
            storage.save()?;

            println!("Updated expense #{}: {}", index, expense);
        }

        ExpenseCommands::Remove { index } => {
            let removed = to_index(index, storage.ledger().expenses().len())
                .and_then(|i| storage.ledger_mut().remove_expense(i))
                .ok_or_else(|| TallyError::expense_not_found(index))?;
            storage.save()?;

            println!("Removed expense #{}: {}", index, removed);
        }

        ExpenseCommands::List => {
            print!("{}", format_expense_list(storage.ledger(), precision));
            if storage.ledger().expenses().is_empty() {
                println!();
            }
        }
    }

    Ok(())
}
