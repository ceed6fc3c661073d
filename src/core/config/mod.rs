//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Hosts embedding the registry configure two things: which metadata store
//! provider backs it, and whether the built-in Sunset field set is
//! registered at startup. Configuration is optional; a missing file means
//! defaults.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$SUNSET_META_CONFIG` if set
//! 2. `~/.sunset/meta.toml`
//!
//! # Example
//!
//! ```no_run
//! use sunset_meta::core::config::RegistryConfig;
//!
//! let config = RegistryConfig::load().unwrap();
//! println!("store provider: {}", config.store_provider());
//! ```

pub mod schema;

pub use schema::{FieldsConfig, RegistryConfig, StoreConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "SUNSET_META_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

impl RegistryConfig {
    /// Load configuration from the default locations.
    ///
    /// A missing config file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read,
    /// parsed, or validated.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".sunset").join("meta.toml");
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load and validate configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ReadError`] if the file cannot be read
    /// - [`ConfigError::ParseError`] if the TOML is malformed
    /// - [`ConfigError::InvalidValue`] if validation fails
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RegistryConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// The canonical config file location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDir`] if the home directory cannot be
    /// determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".sunset").join("meta.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_from_reads_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[store]\nprovider = \"memory\"").unwrap();

        let config = RegistryConfig::load_from(&path).unwrap();
        assert_eq!(config.store_provider(), "memory");
    }

    #[test]
    fn load_from_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RegistryConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn load_from_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.toml");
        fs::write(&path, "not [valid toml").unwrap();

        let err = RegistryConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn load_from_rejects_invalid_provider() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.toml");
        fs::write(&path, "[store]\nprovider = \"sqlite\"\n").unwrap();

        let err = RegistryConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
