//! YAML Export functionality
//!
//! Exports the ledger to YAML for human-readable sharing.

use std::io::Write;

use crate::error::{TallyError, TallyResult};
use crate::export::json::FullExport;
use crate::models::Ledger;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write>(ledger: &Ledger, writer: &mut W) -> TallyResult<()> {
    let export = FullExport::from_ledger(ledger)?;

    writeln!(writer, "# Tally ledger export")
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| TallyError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TallyError::Export(e.to_string()))?;

    Ok(())
}

/// Import a YAML export, returning the ledger it carries
pub fn import_from_yaml(yaml_str: &str) -> TallyResult<Ledger> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| TallyError::Validation(e.to_string()))?;

    export.validate().map_err(TallyError::Validation)?;

    Ok(export.ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sample_ledger;

    #[test]
    fn test_yaml_export() {
        let mut buffer = Vec::new();
        export_full_yaml(&sample_ledger(), &mut buffer).unwrap();

        let yaml = String::from_utf8(buffer).unwrap();
        assert!(yaml.starts_with("# Tally ledger export"));
        assert!(yaml.contains("schema_version"));
        assert!(yaml.contains("Cabin rental"));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let ledger = sample_ledger();
        let mut buffer = Vec::new();
        export_full_yaml(&ledger, &mut buffer).unwrap();

        let imported = import_from_yaml(&String::from_utf8(buffer).unwrap()).unwrap();
        assert_eq!(imported, ledger);
    }
}
