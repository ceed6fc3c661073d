//! store
//!
//! Metadata storage abstraction.
//!
//! # Architecture
//!
//! Metadata values are stored through the [`MetadataStore`] trait, which
//! has multiple implementations:
//!
//! - [`FileMetadataStore`]: JSON document at `~/.sunset/metadata.json`
//!   (default)
//! - [`MemoryStore`]: In-process map, for tests and ephemeral hosts
//!
//! The store is a dumb key-value collaborator: sanitization and
//! authorization live in the registry, which is the only intended caller.
//!
//! # Provider Selection
//!
//! Use [`create_store`] to create a store from configuration:
//!
//! ```
//! use sunset_meta::store::create_store;
//!
//! let store = create_store("memory").unwrap();
//! ```

mod file_store;
mod memory;
mod traits;

pub use file_store::FileMetadataStore;
pub use memory::{FailOn, MemoryStore, StoreOperation};
pub use traits::{MetaKey, MetadataStore, StoreError};

/// Create a metadata store based on the provider name.
///
/// # Providers
///
/// - `"file"` (default): [`FileMetadataStore`] at `~/.sunset/metadata.json`
/// - `"memory"`: [`MemoryStore`] with no persistence
///
/// # Errors
///
/// - Unknown provider name
/// - Initialization errors from the store
pub fn create_store(provider: &str) -> Result<Box<dyn MetadataStore>, StoreError> {
    match provider {
        "file" => Ok(Box::new(FileMetadataStore::new()?)),
        "memory" => Ok(Box::new(MemoryStore::new())),
        other => Err(StoreError::ProviderNotAvailable(format!(
            "unknown store provider: '{}' (valid: {})",
            other,
            valid_provider_names().join(", ")
        ))),
    }
}

/// The provider names [`create_store`] accepts.
pub fn valid_provider_names() -> Vec<&'static str> {
    vec!["file", "memory"]
}

/// The default metadata store provider name.
pub const DEFAULT_PROVIDER: &str = "file";
