//! Runtime settings
//!
//! Read from an optional `ceosdb.toml`:
//!
//! ```toml
//! [store]
//! path = ".ceosdb/catalog.db"
//!
//! [classifier]
//! min_support_count = 10.0
//! min_confidence = 0.5
//!
//! [logging]
//! profile = "development"
//! ```
//!
//! Missing sections and keys fall back to defaults. `CEOSDB_DB` overrides the
//! store path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::classifier::GateThresholds;
use crate::errors::{CeosError, Result};
use crate::logging_facility::Profile;

/// Environment variable overriding `[store] path`
pub const DB_PATH_ENV: &str = "CEOSDB_DB";

/// Default settings file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "ceosdb.toml";

pub const DEFAULT_DB_PATH: &str = ".ceosdb/catalog.db";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub store: StoreSettings,
    pub classifier: GateThresholds,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSettings {
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub profile: Profile,
}

impl Settings {
    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns `Config` if the text is not valid TOML, has unknown keys, or
    /// carries thresholds outside their valid range.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text).map_err(|e| CeosError::Config {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CeosError::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if given, else `ceosdb.toml` if it exists, else defaults;
    /// then apply the environment override.
    ///
    /// # Errors
    ///
    /// Returns `Config` if an explicit or discovered file is invalid.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        settings.apply_env_override(std::env::var_os(DB_PATH_ENV).map(PathBuf::from));
        Ok(settings)
    }

    /// Replace the store path when an override is present and non-empty
    pub fn apply_env_override(&mut self, db_path: Option<PathBuf>) {
        if let Some(path) = db_path.filter(|p| !p.as_os_str().is_empty()) {
            self.store.path = path;
        }
    }

    fn validate(&self) -> Result<()> {
        let GateThresholds {
            min_support_count,
            min_confidence,
        } = self.classifier;
        if !(min_support_count.is_finite() && min_support_count >= 0.0) {
            return Err(CeosError::Config {
                message: format!("min_support_count must be >= 0, got {min_support_count}"),
            });
        }
        if !(0.0..1.0).contains(&min_confidence) {
            return Err(CeosError::Config {
                message: format!("min_confidence must be in [0, 1), got {min_confidence}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.classifier, GateThresholds::default());
        assert_eq!(settings.store.path, PathBuf::from(DEFAULT_DB_PATH));
    }

    #[test]
    fn test_partial_sections() {
        let settings = Settings::from_toml_str(
            r#"
            [classifier]
            min_confidence = 0.6

            [logging]
            profile = "production"
            "#,
        )
        .unwrap();
        assert_eq!(settings.classifier.min_support_count, 10.0);
        assert_eq!(settings.classifier.min_confidence, 0.6);
        assert_eq!(settings.logging.profile, Profile::Production);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Settings::from_toml_str("[store]\nfile = \"x.db\"\n").unwrap_err();
        assert!(matches!(err, CeosError::Config { .. }));
    }

    #[test]
    fn test_out_of_range_confidence_is_rejected() {
        assert!(Settings::from_toml_str("[classifier]\nmin_confidence = 1.5\n").is_err());
    }

    #[test]
    fn test_env_override() {
        let mut settings = Settings::default();
        settings.apply_env_override(Some(PathBuf::from("/tmp/other.db")));
        assert_eq!(settings.store.path, PathBuf::from("/tmp/other.db"));

        settings.apply_env_override(Some(PathBuf::new()));
        assert_eq!(settings.store.path, PathBuf::from("/tmp/other.db"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ceosdb.toml");
        std::fs::write(&path, "[store]\npath = \"data/c.db\"\n").unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.store.path, PathBuf::from("data/c.db"));
    }
}
