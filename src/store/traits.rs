//! store::traits
//!
//! Metadata store trait definition.
//!
//! # Design
//!
//! The `MetadataStore` trait is a narrow key-value interface over the
//! host's durable metadata storage. Keys identify a single field of a
//! single entity; values are whole [`MetadataValue`]s with last-write-wins
//! semantics per key and no transactions spanning keys.
//!
//! The registry is the only intended caller: going through it guarantees
//! sanitization and authorization are applied before anything reaches a
//! store.
//!
//! # Example
//!
//! ```
//! use sunset_meta::core::types::{EntityId, EntityRef, EntityType, FieldName, MetadataValue};
//! use sunset_meta::store::{MemoryStore, MetaKey, MetadataStore};
//!
//! let store = MemoryStore::new();
//! let key = MetaKey::new(
//!     EntityRef::new(EntityType::Post, EntityId::new(42)),
//!     FieldName::new("_sunset_post_subtitle").unwrap(),
//! );
//!
//! store.set(&key, &MetadataValue::text("Hello")).unwrap();
//! assert_eq!(store.get(&key).unwrap(), Some(MetadataValue::text("Hello")));
//! store.delete(&key).unwrap();
//! assert_eq!(store.get(&key).unwrap(), None);
//! ```

use thiserror::Error;

use crate::core::types::{EntityId, EntityRef, EntityType, FieldName, MetadataValue, TypeError};

/// Errors from metadata store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Failed to read from the store.
    #[error("failed to read metadata: {0}")]
    ReadError(String),

    /// Failed to write to the store.
    #[error("failed to write metadata: {0}")]
    WriteError(String),

    /// Failed to delete from the store.
    #[error("failed to delete metadata: {0}")]
    DeleteError(String),

    /// Provider not available or not configured.
    #[error("store provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// The storage key for one field of one entity.
///
/// The canonical string form is `<entity-type>:<id>:<field>`, e.g.
/// `page:7:_sunset_page_header_type`.
///
/// # Example
///
/// ```
/// use sunset_meta::core::types::{EntityId, EntityRef, EntityType, FieldName};
/// use sunset_meta::store::MetaKey;
///
/// let key = MetaKey::new(
///     EntityRef::new(EntityType::Page, EntityId::new(7)),
///     FieldName::new("_sunset_page_header_type").unwrap(),
/// );
/// assert_eq!(key.storage_key(), "page:7:_sunset_page_header_type");
///
/// let parsed: MetaKey = "page:7:_sunset_page_header_type".parse().unwrap();
/// assert_eq!(parsed, key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetaKey {
    /// The entity the value attaches to.
    pub entity: EntityRef,
    /// The field name within that entity.
    pub field: FieldName,
}

impl MetaKey {
    /// Create a key.
    pub fn new(entity: EntityRef, field: FieldName) -> Self {
        Self { entity, field }
    }

    /// The canonical string form used by storage backends.
    pub fn storage_key(&self) -> String {
        format!("{}:{}", self.entity, self.field)
    }
}

impl std::fmt::Display for MetaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

impl std::str::FromStr for MetaKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let entity_type: EntityType = parts
            .next()
            .unwrap_or_default()
            .parse()?;
        let id_part = parts.next().unwrap_or_default();
        let id: u64 = id_part
            .parse()
            .map_err(|_| TypeError::InvalidEntityId(id_part.to_string()))?;
        let field = FieldName::new(parts.next().unwrap_or_default())?;
        Ok(MetaKey::new(
            EntityRef::new(entity_type, EntityId::new(id)),
            field,
        ))
    }
}

/// Trait for metadata storage providers.
///
/// Implementations must be thread-safe (`Send + Sync`). Per-key semantics
/// are last-write-wins; concurrent writes to different keys do not
/// conflict.
pub trait MetadataStore: Send + Sync {
    /// Get the stored value for a key.
    ///
    /// Returns `Ok(Some(value))` if an entry exists, `Ok(None)` if the
    /// field is unset for this entity.
    fn get(&self, key: &MetaKey) -> Result<Option<MetadataValue>, StoreError>;

    /// Store a value, overwriting any prior entry for the key.
    fn set(&self, key: &MetaKey, value: &MetadataValue) -> Result<(), StoreError>;

    /// Delete the entry for a key.
    ///
    /// Deleting a non-existent entry is a no-op success.
    fn delete(&self, key: &MetaKey) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key() -> MetaKey {
        MetaKey::new(
            EntityRef::new(EntityType::CategoryTerm, EntityId::new(9)),
            FieldName::new("_sunset_category_background").unwrap(),
        )
    }

    #[test]
    fn storage_key_round_trip() {
        let key = sample_key();
        let parsed: MetaKey = key.storage_key().parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn storage_key_format() {
        assert_eq!(
            sample_key().storage_key(),
            "category-term:9:_sunset_category_background"
        );
    }

    #[test]
    fn parse_rejects_malformed_keys() {
        assert!("".parse::<MetaKey>().is_err());
        assert!("page".parse::<MetaKey>().is_err());
        assert!("page:7".parse::<MetaKey>().is_err());
        assert!("widget:7:field".parse::<MetaKey>().is_err());
        assert!("page:notanumber:field".parse::<MetaKey>().is_err());
        assert!("page:7:bad field".parse::<MetaKey>().is_err());
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::ReadError("disk gone".into());
        assert!(err.to_string().contains("disk gone"));

        let err = StoreError::ProviderNotAvailable("redis".into());
        assert!(err.to_string().contains("redis"));
    }
}
