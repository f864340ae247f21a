//! Ledger display formatting
//!
//! Formats persons, groups, expenses and prepayments for terminal output.
//! Expense and prepayment positions are shown 1-based.

use crate::models::Ledger;

use super::report::amount;

/// Format the person list with the groups each person belongs to
pub fn format_person_list(ledger: &Ledger) -> String {
    if ledger.persons().is_empty() {
        return "No persons found.".to_string();
    }

    let name_width = column_width(ledger.persons().iter().map(String::len), "Name");

    let mut output = String::new();
    output.push_str(&format!("{:<name_width$}  {}\n", "Name", "Groups"));
    output.push_str(&format!("{:-<name_width$}  {:-<20}\n", "", ""));

    for person in ledger.persons() {
        let groups = ledger.groups_of(person);
        let groups = if groups.is_empty() {
            "(none)".to_string()
        } else {
            groups.join(", ")
        };
        output.push_str(&format!("{:<name_width$}  {}\n", person, groups));
    }

    output.push_str(&format!("\nTotal: {} persons\n", ledger.persons().len()));
    output
}

/// Format all groups with member counts and how many expenses use them
pub fn format_group_list(ledger: &Ledger) -> String {
    if ledger.groups().is_empty() {
        return "No groups found.".to_string();
    }

    let name_width = column_width(ledger.groups().keys().map(String::len), "Group");

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>7}  {:>8}\n",
        "Group", "Members", "Expenses"
    ));
    output.push_str(&format!("{:-<name_width$}  {:->7}  {:->8}\n", "", "", ""));

    for (name, members) in ledger.groups() {
        output.push_str(&format!(
            "{:<name_width$}  {:>7}  {:>8}\n",
            name,
            members.len(),
            ledger.expenses_in_group(name)
        ));
    }

    output
}

/// Format one group's members
pub fn format_group_details(ledger: &Ledger, name: &str, members: &[String]) -> String {
    let mut output = String::new();
    output.push_str(&format!("Group: {}\n", name));
    output.push_str(&format!("  Members ({}):\n", members.len()));
    for member in members {
        output.push_str(&format!("    - {}\n", member));
    }
    output.push_str(&format!(
        "  Used by {} expense(s)\n",
        ledger.expenses_in_group(name)
    ));
    output
}

/// Format the expense list
pub fn format_expense_list(ledger: &Ledger, precision: usize) -> String {
    if ledger.expenses().is_empty() {
        return "No expenses found.".to_string();
    }

    let payer_width = column_width(ledger.expenses().iter().map(|e| e.payer.len()), "Payer");
    let group_width = column_width(ledger.expenses().iter().map(|e| e.group.len()), "Group");

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<payer_width$}  {:>12}  {:<group_width$}  {}\n",
        "#", "Payer", "Amount", "Group", "Subject"
    ));
    output.push_str(&format!(
        "{:->3}  {:-<payer_width$}  {:->12}  {:-<group_width$}  {:-<10}\n",
        "", "", "", "", ""
    ));

    for (i, expense) in ledger.expenses().iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:<payer_width$}  {:>12}  {:<group_width$}  {}\n",
            i + 1,
            expense.payer,
            amount(expense.amount, precision),
            expense.group,
            expense.subject
        ));
    }

    output
}

/// Format the prepayment list
pub fn format_prepayment_list(ledger: &Ledger, precision: usize) -> String {
    if ledger.prepayments().is_empty() {
        return "No prepayments found.".to_string();
    }

    let payer_width = column_width(ledger.prepayments().iter().map(|p| p.payer.len()), "Payer");

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<payer_width$}  {:>12}  {}\n",
        "#", "Payer", "Amount", "Recipient"
    ));
    output.push_str(&format!(
        "{:->3}  {:-<payer_width$}  {:->12}  {:-<10}\n",
        "", "", "", ""
    ));

    for (i, prepayment) in ledger.prepayments().iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:<payer_width$}  {:>12}  {}\n",
            i + 1,
            prepayment.payer,
            amount(prepayment.amount, precision),
            prepayment.recipient
        ));
    }

    output
}

fn column_width(lengths: impl Iterator<Item = usize>, header: &str) -> usize {
    lengths.max().unwrap_or(0).max(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sample_ledger;

    #[test]
    fn test_empty_lists() {
        let ledger = Ledger::new();
        assert_eq!(format_person_list(&ledger), "No persons found.");
        assert_eq!(format_group_list(&ledger), "No groups found.");
        assert_eq!(format_expense_list(&ledger, 2), "No expenses found.");
        assert_eq!(format_prepayment_list(&ledger, 2), "No prepayments found.");
    }

    #[test]
    fn test_person_list_shows_groups() {
        let output = format_person_list(&sample_ledger());
        let eve = output.lines().find(|l| l.starts_with("Eve")).unwrap();
        assert!(eve.contains("Everyone, Cooking"));
        assert!(output.contains("Total: 5 persons"));
    }

    #[test]
    fn test_expense_list_is_one_based() {
        let output = format_expense_list(&sample_ledger(), 2);
        let first = output.lines().nth(2).unwrap();
        assert!(first.trim_start().starts_with("1  Alice"));
        assert!(first.contains("250.00"));
        assert!(first.contains("Cabin rental"));
    }

    #[test]
    fn test_group_details() {
        let ledger = sample_ledger();
        let members = ledger.group("Drivers").unwrap();
        let output = format_group_details(&ledger, "Drivers", members);
        assert!(output.contains("Members (2)"));
        assert!(output.contains("- Charlie"));
        assert!(output.contains("Used by 1 expense(s)"));
    }
}
