//! User settings for Tally
//!
//! Manages user preferences: display precision, the group new persons join by
//! default, and the name of the ledger file.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::TallyPaths;
use crate::error::TallyError;

/// User settings for Tally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number of decimals used when printing amounts
    #[serde(default = "default_display_precision")]
    pub display_precision: usize,

    /// Group that `person add` puts new persons in when no group is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_group: Option<String>,

    /// Ledger file name, relative to the base directory unless absolute
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_display_precision() -> usize {
    2
}

fn default_ledger_file() -> String {
    "ledger.json".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            display_precision: default_display_precision(),
            default_group: None,
            ledger_file: default_ledger_file(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TallyError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            debug!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TallyError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| TallyError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.display_precision, 2);
        assert_eq!(settings.ledger_file, "ledger.json");
        assert!(settings.default_group.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.display_precision = 3;
        settings.default_group = Some("All".into());

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.display_precision, 3);
        assert_eq!(loaded.default_group.as_deref(), Some("All"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_group": "Alle"}"#).unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.display_precision, 2);
        assert_eq!(settings.ledger_file, "ledger.json");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, TallyError::Config(_)));
    }
}
