//! store::memory
//!
//! In-memory metadata store for tests and ephemeral hosts.
//!
//! # Design
//!
//! The memory store keeps entries in a map behind a mutex and allows
//! configuring failure scenarios, so registry error paths can be exercised
//! deterministically. It also records every operation it performs, which
//! lets tests assert that rejected writes never touched the store.
//!
//! # Example
//!
//! ```
//! use sunset_meta::core::types::{EntityId, EntityRef, EntityType, FieldName, MetadataValue};
//! use sunset_meta::store::{MemoryStore, MetaKey, MetadataStore};
//!
//! let store = MemoryStore::new();
//! let key = MetaKey::new(
//!     EntityRef::new(EntityType::Page, EntityId::new(1)),
//!     FieldName::new("_sunset_page_header_type").unwrap(),
//! );
//!
//! store.set(&key, &MetadataValue::text("cover")).unwrap();
//! assert_eq!(store.len(), 1);
//! store.delete(&key).unwrap();
//! assert!(store.is_empty());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{MetaKey, MetadataStore, StoreError};
use crate::core::types::MetadataValue;

/// In-memory metadata store.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share the
/// same underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MemoryStoreInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MemoryStoreInner {
    /// Stored values by canonical storage key.
    entries: HashMap<String, MetadataValue>,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<StoreOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail `get` with the given error.
    Get(StoreError),
    /// Fail `set` with the given error.
    Set(StoreError),
    /// Fail `delete` with the given error.
    Delete(StoreError),
}

/// A recorded store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    /// A `get` for the given storage key.
    Get(String),
    /// A `set` for the given storage key.
    Set(String),
    /// A `delete` for the given storage key.
    Delete(String),
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure an operation to fail.
    pub fn fail_on(&self, fail: FailOn) {
        self.lock().fail_on = Some(fail);
    }

    /// Clear any configured failure.
    pub fn clear_failure(&self) {
        self.lock().fail_on = None;
    }

    /// The operations performed so far, in order.
    pub fn operations(&self) -> Vec<StoreOperation> {
        self.lock().operations.clone()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryStoreInner> {
        // A poisoned mutex means a panic mid-test; propagating the panic
        // is the right behavior there.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MetadataStore for MemoryStore {
    fn get(&self, key: &MetaKey) -> Result<Option<MetadataValue>, StoreError> {
        let mut inner = self.lock();
        let storage_key = key.storage_key();
        inner.operations.push(StoreOperation::Get(storage_key.clone()));
        if let Some(FailOn::Get(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        Ok(inner.entries.get(&storage_key).cloned())
    }

    fn set(&self, key: &MetaKey, value: &MetadataValue) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let storage_key = key.storage_key();
        inner.operations.push(StoreOperation::Set(storage_key.clone()));
        if let Some(FailOn::Set(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        inner.entries.insert(storage_key, value.clone());
        Ok(())
    }

    fn delete(&self, key: &MetaKey) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let storage_key = key.storage_key();
        inner
            .operations
            .push(StoreOperation::Delete(storage_key.clone()));
        if let Some(FailOn::Delete(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        inner.entries.remove(&storage_key);
        Ok(())
    }
}
