//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., the store provider must name a known provider).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Registry configuration.
///
/// # Example
///
/// ```toml
/// [store]
/// provider = "file"
/// path = "/var/lib/sunset/metadata.json"
///
/// [fields]
/// builtins = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Metadata store settings
    pub store: Option<StoreConfig>,

    /// Field declaration settings
    pub fields: Option<FieldsConfig>,
}

impl RegistryConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(store) = &self.store {
            store.validate()?;
        }
        Ok(())
    }

    /// The configured store provider, defaulting to the crate default.
    pub fn store_provider(&self) -> &str {
        self.store
            .as_ref()
            .and_then(|s| s.provider.as_deref())
            .unwrap_or(crate::store::DEFAULT_PROVIDER)
    }

    /// The configured store path, if any.
    pub fn store_path(&self) -> Option<&PathBuf> {
        self.store.as_ref().and_then(|s| s.path.as_ref())
    }

    /// Whether the built-in Sunset field set should be registered.
    pub fn builtins_enabled(&self) -> bool {
        self.fields
            .as_ref()
            .and_then(|f| f.builtins)
            .unwrap_or(true)
    }
}

/// Metadata store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Store provider name (e.g., "file", "memory")
    pub provider: Option<String>,

    /// Override path for the file provider
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Validate the store settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unknown provider.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(provider) = &self.provider {
            let valid = crate::store::valid_provider_names();
            if !valid.contains(&provider.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid store provider '{}', must be one of: {}",
                    provider,
                    valid.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Field declaration settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FieldsConfig {
    /// Register the built-in Sunset field set at startup (default: true)
    pub builtins: Option<bool>,
}
