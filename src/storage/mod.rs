//! Storage layer for Tally
//!
//! The whole ledger lives in one JSON document with four fields: `persons`,
//! `groups`, `expenses` and `prepayments`. Writes are atomic.

pub mod file_io;
pub mod init;

pub use file_io::{read_json, write_atomic, write_json_atomic, write_text_atomic};
pub use init::{initialize_storage, sample_ledger};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::TallyResult;
use crate::models::Ledger;

/// Owns the in-memory ledger and the file it is persisted to
pub struct Storage {
    path: PathBuf,
    ledger: Ledger,
}

impl Storage {
    /// Create a storage handle for the given ledger file
    ///
    /// Nothing is read until [`Storage::load`] is called.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ledger: Ledger::new(),
        }
    }

    /// Create a storage handle and load the ledger in one step
    pub fn open(path: PathBuf) -> TallyResult<Self> {
        let mut storage = Self::new(path);
        storage.load()?;
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the ledger file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Load the ledger from disk; a missing file yields an empty ledger
    pub fn load(&mut self) -> TallyResult<()> {
        self.ledger = read_json(&self.path)?;
        debug!(
            path = %self.path.display(),
            persons = self.ledger.persons().len(),
            expenses = self.ledger.expenses().len(),
            "loaded ledger"
        );
        Ok(())
    }

    /// Save the ledger to disk
    pub fn save(&self) -> TallyResult<()> {
        write_json_atomic(&self.path, &self.ledger)?;
        info!(path = %self.path.display(), "saved ledger");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Prepayment;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(temp_dir.path().join("ledger.json")).unwrap();

        assert!(!storage.exists());
        assert!(storage.ledger().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");

        let mut storage = Storage::new(path.clone());
        {
            let ledger = storage.ledger_mut();
            ledger.add_person("Alice", None).unwrap();
            ledger.add_person("Bob", None).unwrap();
            ledger
                .upsert_prepayment(Prepayment::new("Bob", 0.1 + 0.2, "Alice"), None)
                .unwrap();
        }
        storage.save().unwrap();

        let reloaded = Storage::open(path).unwrap();
        assert_eq!(reloaded.ledger(), storage.ledger());
        // f64 survives the JSON round trip bit for bit
        assert_eq!(reloaded.ledger().prepayments()[0].amount.value(), 0.1 + 0.2);
    }

    #[test]
    fn test_reads_hand_written_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"{
                "persons": ["Alice", "Bob"],
                "groups": {"All": ["Alice", "Bob"]},
                "expenses": [{"person": "Alice", "amount": 40, "group": "All", "subject": "Wood"}],
                "prepayments": []
            }"#,
        )
        .unwrap();

        let storage = Storage::open(path).unwrap();
        let ledger = storage.ledger();
        assert_eq!(ledger.persons(), &["Alice".to_string(), "Bob".to_string()][..]);
        assert_eq!(ledger.expenses()[0].amount.value(), 40.0);
        assert_eq!(ledger.expenses()[0].subject, "Wood");
    }
}
