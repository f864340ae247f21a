//! File I/O utilities with atomic writes
//!
//! Every file Tally writes (ledger, exports, saved reports) goes through
//! [`write_atomic`]: the content is written to a sibling temp file, synced,
//! and renamed over the target, so a crash never leaves a half-written file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{TallyError, TallyResult};

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> TallyResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| TallyError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| TallyError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write a file atomically using the given writer callback
pub fn write_atomic<P, F>(path: P, write: F) -> TallyResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> TallyResult<()>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            TallyError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| TallyError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let result = write(&mut writer)
        .and_then(|_| {
            writer
                .flush()
                .map_err(|e| TallyError::Storage(format!("Failed to flush data: {}", e)))
        })
        .and_then(|_| {
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| TallyError::Storage(format!("Failed to sync data: {}", e)))
        });

    if let Err(e) = result {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    drop(writer);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TallyError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

/// Write pretty-printed JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> TallyResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, data)
            .map_err(|e| TallyError::Storage(format!("Failed to serialize data: {}", e)))?;
        writeln!(writer).map_err(|e| TallyError::Storage(format!("Failed to write data: {}", e)))
    })
}

/// Write plain text to a file atomically
pub fn write_text_atomic<P: AsRef<Path>>(path: P, text: &str) -> TallyResult<()> {
    write_atomic(path, |writer| {
        writer
            .write_all(text.as_bytes())
            .map_err(|e| TallyError::Storage(format!("Failed to write data: {}", e)))
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Groups, Ledger};
    use tempfile::TempDir;

    fn small_ledger() -> Ledger {
        let mut groups = Groups::new();
        groups.insert("All".into(), vec!["Alice".into(), "Bob".into()]);
        Ledger::from_parts(
            vec!["Alice".into(), "Bob".into()],
            groups,
            vec![Expense::new("Alice", 12.34, "All", "Pizza")],
            Vec::new(),
        )
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let ledger: Ledger = read_json(&path).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");

        let ledger = small_ledger();
        write_json_atomic(&path, &ledger).unwrap();

        let loaded: Ledger = read_json(&path).unwrap();
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn test_parse_error_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Ledger, _>(&path).unwrap_err();
        assert!(matches!(err, TallyError::Storage(_)));
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.txt");

        write_text_atomic(&path, "hello\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!temp_dir.path().join("report.txt.tmp").exists());
    }

    #[test]
    fn test_failed_write_keeps_old_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        write_text_atomic(&path, "old").unwrap();

        let result = write_atomic(&path, |_| Err(TallyError::Export("boom".into())));

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert!(!temp_dir.path().join("ledger.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("ledger.json");

        write_json_atomic(&path, &small_ledger()).unwrap();
        assert!(path.exists());
    }
}
