//! Summary report
//!
//! Renders the ledger's inputs, the settling transactions and a per-person
//! check as plain text. Consumes the outputs of the balance and settlement
//! services and never changes them.
//!
//! Amounts are unrounded `f64`, so a balance that is zero up to drift (say
//! `-2.8e-14`) prints as "Owes 0.00", and the planner may list a "pays 0.00"
//! transaction for such leftovers.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Ledger, Money};
use crate::services::{BalanceSheet, Settlement, Transaction};

const RULE_WIDTH: usize = 60;

/// One row of the per-person check
#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "Person")]
    person: String,
    #[tabled(rename = "Owed")]
    owed: String,
    #[tabled(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Received")]
    received: String,
    #[tabled(rename = "Result")]
    result: String,
}

/// Format an amount with the configured number of decimals
pub fn amount(value: Money, precision: usize) -> String {
    value.format_with_precision(precision)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "=".repeat(width)
}

/// Describe a net balance as what the person expects back or still owes
pub fn describe_balance(balance: Money, precision: usize) -> String {
    if balance.is_negative() {
        format!("Owes {}", amount(balance.abs(), precision))
    } else {
        format!("Expects {}", amount(balance, precision))
    }
}

/// Per-person table: owed, paid, received and the net result
///
/// Rows are sorted by name.
pub fn format_balance_table(sheet: &BalanceSheet, precision: usize) -> String {
    if sheet.balance.is_empty() {
        return "No persons yet.".to_string();
    }

    let mut persons: Vec<&String> = sheet.balance.keys().collect();
    persons.sort();

    let rows: Vec<CheckRow> = persons
        .into_iter()
        .map(|person| CheckRow {
            person: person.clone(),
            owed: amount(sheet.owed_by(person), precision),
            paid: amount(sheet.paid_by(person), precision),
            received: amount(sheet.received_by(person), precision),
            result: describe_balance(sheet.balance_of(person), precision),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()));
    table.to_string()
}

/// One line per transaction, in planner order
pub fn format_transactions(transactions: &[Transaction], precision: usize) -> String {
    if transactions.is_empty() {
        return "Nothing to settle.".to_string();
    }

    transactions
        .iter()
        .map(|t| format!("{} pays {} {}", t.from, t.to, amount(t.amount, precision)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full text summary
pub fn build_summary(ledger: &Ledger, settlement: &Settlement, precision: usize) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("Starting point of the cost split:".to_string());

    lines.push(String::new());
    lines.push("Expenses:".to_string());
    if ledger.expenses().is_empty() {
        lines.push("- none".to_string());
    }
    for expense in ledger.expenses() {
        let size = ledger.group(&expense.group).map_or(0, <[String]>::len);
        lines.push(format!(
            "- {} spent {} on {}, split across group '{}' ({} {}).",
            expense.payer,
            amount(expense.amount, precision),
            expense.subject,
            expense.group,
            size,
            if size == 1 { "person" } else { "persons" }
        ));
    }

    lines.push(String::new());
    lines.push("Prepayments:".to_string());
    if ledger.prepayments().is_empty() {
        lines.push("- none".to_string());
    }
    for prepayment in ledger.prepayments() {
        lines.push(format!(
            "- {} prepaid {} to {}.",
            prepayment.payer,
            amount(prepayment.amount, precision),
            prepayment.recipient
        ));
    }

    lines.push(String::new());
    lines.push(separator(RULE_WIDTH));

    lines.push(String::new());
    lines.push("Transactions to settle:".to_string());
    lines.push(format_transactions(&settlement.transactions, precision));

    lines.push(String::new());
    lines.push("Per-person check:".to_string());
    lines.push(format_balance_table(&settlement.balances, precision));

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
