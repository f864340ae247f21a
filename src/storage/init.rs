//! Storage initialization
//!
//! Handles first-run setup and the sample ledger.

use std::path::Path;

use tracing::info;

use crate::error::{TallyError, TallyResult};
use crate::models::{Expense, Groups, Ledger, Prepayment};

use super::file_io::write_json_atomic;

/// Create the ledger file, empty or filled with the sample trip
///
/// An existing file is only replaced when `force` is set.
pub fn initialize_storage(path: &Path, sample: bool, force: bool) -> TallyResult<Ledger> {
    if path.exists() && !force {
        return Err(TallyError::Storage(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let ledger = if sample { sample_ledger() } else { Ledger::new() };
    write_json_atomic(path, &ledger)?;

    info!(path = %path.display(), sample, "initialized ledger");
    Ok(ledger)
}

/// A small weekend trip: five people, four overlapping groups
pub fn sample_ledger() -> Ledger {
    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    let people = ["Alice", "Bob", "Charlie", "Diana", "Eve"];

    let mut groups = Groups::new();
    groups.insert("Everyone".into(), names(&people));
    groups.insert("Drivers".into(), names(&["Alice", "Charlie"]));
    groups.insert("Hikers".into(), names(&["Alice", "Bob", "Diana"]));
    groups.insert("Cooking".into(), names(&["Bob", "Charlie", "Eve"]));

    let expenses = vec![
        Expense::new("Alice", 250.0, "Everyone", "Cabin rental"),
        Expense::new("Bob", 120.0, "Everyone", "Groceries"),
        Expense::new("Charlie", 80.0, "Drivers", "Gas"),
        Expense::new("Diana", 35.0, "Hikers", "Trail fees"),
        Expense::new("Eve", 65.0, "Cooking", "Special ingredients"),
        Expense::new("Bob", 40.0, "Everyone", "Drinks"),
    ];

    let prepayments = vec![
        Prepayment::new("Charlie", 50.0, "Alice"),
        Prepayment::new("Diana", 30.0, "Bob"),
    ];

    Ledger::from_parts(names(&people), groups, expenses, prepayments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_sample_ledger_is_valid() {
        let ledger = sample_ledger();
        assert!(ledger.validate().is_ok());
        assert_eq!(ledger.persons().len(), 5);
        assert_eq!(ledger.groups().len(), 4);
        assert_eq!(ledger.expenses().len(), 6);
        assert_eq!(ledger.prepayments().len(), 2);
    }

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");

        initialize_storage(&path, false, false).unwrap();
        let loaded: Ledger = read_json(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_initialize_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");

        initialize_storage(&path, true, false).unwrap();
        assert!(initialize_storage(&path, false, false).is_err());

        // Still the sample
        let loaded: Ledger = read_json(&path).unwrap();
        assert_eq!(loaded, sample_ledger());

        initialize_storage(&path, false, true).unwrap();
        let loaded: Ledger = read_json(&path).unwrap();
        assert!(loaded.is_empty());
    }
}
