//! store::file_store
//!
//! File-backed metadata storage.
//!
//! # Architecture
//!
//! Values persist in a single JSON document, keyed by the canonical
//! `<entity-type>:<id>:<field>` storage key. The document carries a schema
//! version and the timestamp of the last write.
//!
//! # Durability
//!
//! - All writes are atomic (write to temp file, sync, then rename)
//! - Read-modify-write sequences hold an OS-level exclusive lock on a
//!   sidecar lock file, so concurrent processes serialize their writes
//! - Readers never block: they see either the old or the new document,
//!   never a partial one
//!
//! # Example
//!
//! ```ignore
//! use sunset_meta::store::{FileMetadataStore, MetadataStore};
//!
//! let store = FileMetadataStore::new()?;
//! store.set(&key, &MetadataValue::text("cover"))?;
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use super::traits::{MetaKey, MetadataStore, StoreError};
use crate::core::types::{MetadataValue, UtcTimestamp};

/// Current on-disk document schema version.
const DOCUMENT_VERSION: u32 = 1;

/// The on-disk document.
///
/// Entries use a `BTreeMap` so serialization order is stable and diffs of
/// the document stay readable.
#[derive(Debug, Serialize, Deserialize)]
struct MetadataDocument {
    /// Schema version of this document.
    version: u32,
    /// When the document was last written.
    updated_at: UtcTimestamp,
    /// Stored values by canonical storage key.
    entries: BTreeMap<String, MetadataValue>,
}

impl MetadataDocument {
    fn empty() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            updated_at: UtcTimestamp::now(),
            entries: BTreeMap::new(),
        }
    }
}

/// Guard holding the exclusive document lock; released on drop.
struct DocumentLock(File);

impl Drop for DocumentLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.0);
    }
}

/// File-backed metadata store.
///
/// Stores all metadata in a JSON document, by default at
/// `~/.sunset/metadata.json`.
///
/// # Example
///
/// ```ignore
/// use sunset_meta::store::{FileMetadataStore, MetadataStore};
///
/// let store = FileMetadataStore::new()?;
/// if let Some(value) = store.get(&key)? {
///     println!("stored: {:?}", value);
/// }
/// ```
#[derive(Debug)]
pub struct FileMetadataStore {
    /// Path to the metadata document.
    path: PathBuf,
}

impl FileMetadataStore {
    /// Create a file store at the default location.
    ///
    /// The default location is `~/.sunset/metadata.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StoreError> {
        let home = dirs::home_dir()
            .ok_or_else(|| StoreError::ReadError("cannot determine home directory".into()))?;
        let path = home.join(".sunset").join("metadata.json");
        Ok(Self { path })
    }

    /// Create a file store at a custom path.
    ///
    /// This is primarily useful for testing.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The path to the metadata document.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read the document from disk.
    ///
    /// A missing file is an empty document, not an error.
    fn read_document(&self) -> Result<MetadataDocument, StoreError> {
        if !self.path.exists() {
            return Ok(MetadataDocument::empty());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::ReadError(format!("cannot read metadata file: {}", e)))?;

        let doc: MetadataDocument = serde_json::from_str(&content)
            .map_err(|e| StoreError::ReadError(format!("cannot parse metadata file: {}", e)))?;

        if doc.version > DOCUMENT_VERSION {
            return Err(StoreError::ReadError(format!(
                "unsupported metadata document version {}",
                doc.version
            )));
        }

        Ok(doc)
    }

    /// Write the document to disk atomically.
    fn write_document(&self, mut doc: MetadataDocument) -> Result<(), StoreError> {
        doc.updated_at = UtcTimestamp::now();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::WriteError(format!("cannot create directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(&doc)
            .map_err(|e| StoreError::WriteError(format!("cannot serialize metadata: {}", e)))?;

        // Write to a temp file first for atomicity
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| StoreError::WriteError(format!("cannot create temp file: {}", e)))?;

            file.write_all(content.as_bytes())
                .map_err(|e| StoreError::WriteError(format!("cannot write metadata: {}", e)))?;

            file.sync_all()
                .map_err(|e| StoreError::WriteError(format!("cannot sync to disk: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path)
            .map_err(|e| StoreError::WriteError(format!("cannot rename temp file: {}", e)))?;

        Ok(())
    }

    /// Acquire the exclusive lock serializing read-modify-write sequences.
    ///
    /// Blocks until the lock is available; released when the guard drops.
    fn lock(&self) -> Result<DocumentLock, StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::WriteError(format!("cannot create directory: {}", e)))?;
        }

        let lock_path = self.path.with_extension("lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| StoreError::WriteError(format!("cannot open lock file: {}", e)))?;

        file.lock_exclusive()
            .map_err(|e| StoreError::WriteError(format!("cannot acquire lock: {}", e)))?;

        Ok(DocumentLock(file))
    }
}

impl MetadataStore for FileMetadataStore {
    fn get(&self, key: &MetaKey) -> Result<Option<MetadataValue>, StoreError> {
        let doc = self.read_document()?;
        Ok(doc.entries.get(&key.storage_key()).cloned())
    }

    fn set(&self, key: &MetaKey, value: &MetadataValue) -> Result<(), StoreError> {
        let _lock = self.lock()?;
        let mut doc = self.read_document()?;
        doc.entries.insert(key.storage_key(), value.clone());
        self.write_document(doc)
    }

    fn delete(&self, key: &MetaKey) -> Result<(), StoreError> {
        let _lock = self.lock()?;
        let mut doc = self.read_document()?;
        // Deleting an absent entry is a no-op: don't rewrite the document.
        if doc.entries.remove(&key.storage_key()).is_none() {
            return Ok(());
        }
        self.write_document(doc)
    }
}
