//! CLI commands for data export and import
//!
//! Exports go to stdout unless `--output` is given.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use crate::error::{TallyError, TallyResult};
use crate::export::{csv, json, yaml};
use crate::storage::{write_atomic, Storage};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON (ledger, balances and transactions; importable)
    Json,
    /// YAML (same content as JSON, human-readable; importable)
    Yaml,
    /// CSV (settling transactions, or balances with --balances)
    Csv,
}

/// Arguments of `tally export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Export per-person balances instead of transactions (CSV only)
    #[arg(long)]
    pub balances: bool,
}

/// Arguments of `tally import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON or YAML export to read (format chosen by extension)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Replace a ledger that already has data
    #[arg(short, long)]
    pub force: bool,
}

/// Render the export into memory
pub fn render_export(storage: &Storage, args: &ExportArgs) -> TallyResult<Vec<u8>> {
    let ledger = storage.ledger();
    let mut buffer = Vec::new();

    match args.format {
        ExportFormat::Json => json::export_full_json(ledger, &mut buffer, !args.compact)?,
        ExportFormat::Yaml => yaml::export_full_yaml(ledger, &mut buffer)?,
        ExportFormat::Csv if args.balances => csv::export_balances_csv(ledger, &mut buffer)?,
        ExportFormat::Csv => csv::export_transactions_csv(ledger, &mut buffer)?,
    }

    Ok(buffer)
}

/// Handle `tally export`
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> TallyResult<()> {
    let data = render_export(storage, &args)?;

    match &args.output {
        Some(path) => {
            write_atomic(path, |writer| {
                writer.write_all(&data).map_err(|e| {
                    TallyError::Export(format!("Failed to write {}: {}", path.display(), e))
                })
            })?;
            info!(path = %path.display(), format = ?args.format, "exported ledger");
            println!("Exported ledger to: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&data)
                .and_then(|_| stdout.flush())
                .map_err(|e| TallyError::Export(e.to_string()))?;
        }
    }

    Ok(())
}

/// Handle `tally import`
pub fn handle_import_command(storage: &mut Storage, args: ImportArgs) -> TallyResult<()> {
    if !storage.ledger().is_empty() && !args.force {
        return Err(TallyError::Storage(format!(
            "Ledger at {} already has data. Use --force to replace it.",
            storage.path().display()
        )));
    }

    let contents = std::fs::read_to_string(&args.input).map_err(|e| {
        TallyError::Io(format!("Failed to read {}: {}", args.input.display(), e))
    })?;

    let is_yaml = args
        .input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let ledger = if is_yaml {
        yaml::import_from_yaml(&contents)?
    } else {
        json::import_from_json(&contents)?
    };

    *storage.ledger_mut() = ledger;
    storage.save()?;

    let ledger = storage.ledger();
    println!("Imported ledger from: {}", args.input.display());
    println!(
        "  {} persons, {} groups, {} expenses, {} prepayments",
        ledger.persons().len(),
        ledger.groups().len(),
        ledger.expenses().len(),
        ledger.prepayments().len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{sample_ledger, write_json_atomic};
    use tempfile::TempDir;

    fn sample_storage(dir: &TempDir) -> Storage {
        let path = dir.path().join("ledger.json");
        write_json_atomic(&path, &sample_ledger()).unwrap();
        Storage::open(path).unwrap()
    }

    fn args(format: ExportFormat) -> ExportArgs {
        ExportArgs {
            format,
            output: None,
            compact: false,
            balances: false,
        }
    }

    #[test]
    fn test_render_csv_variants() {
        let dir = TempDir::new().unwrap();
        let storage = sample_storage(&dir);

        let transactions = render_export(&storage, &args(ExportFormat::Csv)).unwrap();
        assert!(String::from_utf8(transactions).unwrap().starts_with("from,to,amount"));

        let mut balances_args = args(ExportFormat::Csv);
        balances_args.balances = true;
        let balances = render_export(&storage, &balances_args).unwrap();
        assert!(String::from_utf8(balances).unwrap().starts_with("person,paid"));
    }

    #[test]
    fn test_compact_json_is_one_line() {
        let dir = TempDir::new().unwrap();
        let storage = sample_storage(&dir);

        let mut compact = args(ExportFormat::Json);
        compact.compact = true;
        let data = String::from_utf8(render_export(&storage, &compact).unwrap()).unwrap();
        assert_eq!(data.lines().count(), 1);
    }

    #[test]
    fn test_export_then_import_yaml() {
        let dir = TempDir::new().unwrap();
        let source = sample_storage(&dir);
        let export_path = dir.path().join("trip.yaml");

        let mut export_args = args(ExportFormat::Yaml);
        export_args.output = Some(export_path.clone());
        handle_export_command(&source, export_args).unwrap();

        let mut target = Storage::new(dir.path().join("other.json"));
        handle_import_command(
            &mut target,
            ImportArgs {
                input: export_path,
                force: false,
            },
        )
        .unwrap();

        assert_eq!(target.ledger(), source.ledger());
        assert!(dir.path().join("other.json").exists());
    }

    #[test]
    fn test_import_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let mut storage = sample_storage(&dir);
        let export_path = dir.path().join("trip.json");
        std::fs::write(&export_path, "{}").unwrap();

        let err = handle_import_command(
            &mut storage,
            ImportArgs {
                input: export_path,
                force: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, TallyError::Storage(_)));
    }
}
