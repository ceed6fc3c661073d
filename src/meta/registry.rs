//! meta::registry
//!
//! The metadata registry: the single gate between untrusted form input
//! and the metadata store.
//!
//! # Write pipeline
//!
//! Every write runs the same pipeline, in order:
//!
//! 1. Resolve the field declaration (unknown fields are errors)
//! 2. Authorize the principal (unauthorized writes never touch the store)
//! 3. Delete-on-empty: missing or empty input deletes the entry
//! 4. Sanitize: accepted values are stored; rejected values clear the
//!    entry so stale data cannot survive behind invalid input
//!
//! # Example
//!
//! ```
//! use sunset_meta::core::types::{EntityId, EntityRef, EntityType, RawValue};
//! use sunset_meta::host::{Capability, CapabilityContent, Principal};
//! use sunset_meta::meta::{FieldSet, MetadataRegistry, WriteOutcome};
//! use sunset_meta::store::MemoryStore;
//!
//! let fields = FieldSet::with_builtins().unwrap();
//! let store = MemoryStore::new();
//! let content = CapabilityContent::new();
//! let registry = MetadataRegistry::new(&fields, &store, &content);
//!
//! let editor = Principal::new(1).with_capability(Capability::EditPosts);
//! let page = EntityRef::new(EntityType::Page, EntityId::new(7));
//! let name = "_sunset_page_header_type".parse().unwrap();
//!
//! let outcome = registry
//!     .write(page, &name, RawValue::text("cover"), &editor)
//!     .unwrap();
//! assert!(matches!(outcome, WriteOutcome::Stored(_)));
//!
//! // Empty input unsets the field.
//! registry.write(page, &name, RawValue::Missing, &editor).unwrap();
//! assert_eq!(registry.read(page, &name).unwrap(), None);
//! ```

use thiserror::Error;

use super::schema::{FieldSet, MetadataField};
use crate::core::choices::RenderedChoice;
use crate::core::sanitize::SanitizeError;
use crate::core::types::{EntityRef, EntityType, FieldName, MetadataValue, RawValue, TypeError};
use crate::host::{ContentRepository, FormInput, Principal};
use crate::store::{MetaKey, MetadataStore, StoreError};

/// Errors from registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A field with this (entity type, name) pair is already registered.
    #[error("field already registered for {entity_type}: {name}")]
    DuplicateField {
        entity_type: EntityType,
        name: FieldName,
    },

    /// No field with this (entity type, name) pair is registered.
    #[error("unknown field for {entity_type}: {name}")]
    UnknownField {
        entity_type: EntityType,
        name: FieldName,
    },

    /// The principal is not authorized to write the field.
    #[error("principal not authorized to write field: {name}")]
    Unauthorized { name: FieldName },

    /// The sanitizer rejected the input; any stored entry was cleared.
    #[error("value rejected for field {name}: {source}")]
    Rejected {
        name: FieldName,
        #[source]
        source: SanitizeError,
    },

    /// A field declaration was itself invalid.
    #[error("invalid field definition: {0}")]
    InvalidDefinition(#[from] TypeError),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The sanitized value now stored under the field.
    Stored(MetadataValue),
    /// The field's entry was deleted (empty or missing input).
    Cleared,
}

/// What happened to one field while applying a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDisposition {
    /// The sanitized value was stored.
    Stored(MetadataValue),
    /// The entry was deleted.
    Cleared,
    /// The principal was not authorized; the store was not touched.
    Denied,
    /// The sanitizer rejected the input; the entry was cleared.
    Rejected(SanitizeError),
}

/// Per-field record in a [`FormReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    /// The field's storage name.
    pub field: FieldName,
    /// What happened to it.
    pub disposition: FieldDisposition,
}

/// The per-field results of applying one form submission.
///
/// Denials and rejections are reported here rather than aborting the
/// whole submission; only store failures abort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    outcomes: Vec<FieldOutcome>,
}

impl FormReport {
    /// The per-field outcomes, in field registration order.
    pub fn outcomes(&self) -> &[FieldOutcome] {
        &self.outcomes
    }

    /// The outcome for a field by storage name.
    pub fn get(&self, name: &str) -> Option<&FieldDisposition> {
        self.outcomes
            .iter()
            .find(|o| o.field.as_str() == name)
            .map(|o| &o.disposition)
    }

    /// Number of fields that stored a value.
    pub fn stored(&self) -> usize {
        self.count(|d| matches!(d, FieldDisposition::Stored(_)))
    }

    /// Number of fields whose entries were cleared.
    pub fn cleared(&self) -> usize {
        self.count(|d| matches!(d, FieldDisposition::Cleared))
    }

    /// Number of fields denied by authorization.
    pub fn denied(&self) -> usize {
        self.count(|d| matches!(d, FieldDisposition::Denied))
    }

    /// Number of fields whose input the sanitizer rejected.
    pub fn rejected(&self) -> usize {
        self.count(|d| matches!(d, FieldDisposition::Rejected(_)))
    }

    /// Whether every field was stored or cleared.
    pub fn is_clean(&self) -> bool {
        self.denied() == 0 && self.rejected() == 0
    }

    /// The names of fields that were denied or rejected.
    pub fn problems(&self) -> impl Iterator<Item = &FieldName> {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o.disposition,
                    FieldDisposition::Denied | FieldDisposition::Rejected(_)
                )
            })
            .map(|o| &o.field)
    }

    fn count(&self, pred: impl Fn(&FieldDisposition) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.disposition)).count()
    }
}

/// The metadata registry.
///
/// Borrows its field set, store, and content repository from the host,
/// which keeps the registry itself cheap to construct per request.
pub struct MetadataRegistry<'a> {
    fields: &'a FieldSet,
    store: &'a dyn MetadataStore,
    content: &'a dyn ContentRepository,
}

impl<'a> MetadataRegistry<'a> {
    /// Create a registry over a field set, store, and content repository.
    pub fn new(
        fields: &'a FieldSet,
        store: &'a dyn MetadataStore,
        content: &'a dyn ContentRepository,
    ) -> Self {
        Self {
            fields,
            store,
            content,
        }
    }

    /// The field set this registry serves.
    pub fn fields(&self) -> &FieldSet {
        self.fields
    }

    /// Read the stored value of a field for an entity.
    ///
    /// Returns `Ok(None)` if the field is unset for this entity.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownField`] if no such field is registered for
    /// the entity's type; [`RegistryError::Store`] on backend failure.
    pub fn read(
        &self,
        entity: EntityRef,
        field: &FieldName,
    ) -> Result<Option<MetadataValue>, RegistryError> {
        let def = self.resolve(entity.entity_type, field)?;
        let key = MetaKey::new(entity, def.name().clone());
        Ok(self.store.get(&key)?)
    }

    /// Write raw input to a field for an entity.
    ///
    /// Runs the full pipeline: authorization, delete-on-empty, then
    /// sanitization.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownField`] for unregistered fields
    /// - [`RegistryError::Unauthorized`] if the principal fails the
    ///   field's policy; the store is not touched
    /// - [`RegistryError::Rejected`] if the sanitizer refuses the input;
    ///   the field's entry is cleared first
    /// - [`RegistryError::Store`] on backend failure
    pub fn write(
        &self,
        entity: EntityRef,
        field: &FieldName,
        raw: RawValue,
        principal: &Principal,
    ) -> Result<WriteOutcome, RegistryError> {
        let def = self.resolve(entity.entity_type, field)?;

        if !def.auth().is_authorized(self.content, principal, entity) {
            return Err(RegistryError::Unauthorized {
                name: def.name().clone(),
            });
        }

        let key = MetaKey::new(entity, def.name().clone());

        if raw.is_empty() {
            self.store.delete(&key)?;
            return Ok(WriteOutcome::Cleared);
        }

        match def.sanitizer().apply(&raw) {
            Ok(value) => {
                self.store.set(&key, &value)?;
                Ok(WriteOutcome::Stored(value))
            }
            Err(source) => {
                // Invalid input must not leave a stale value behind.
                self.store.delete(&key)?;
                Err(RegistryError::Rejected {
                    name: def.name().clone(),
                    source,
                })
            }
        }
    }

    /// Render a field's choice list against its stored value.
    ///
    /// Returns `Ok(None)` for fields without an enumerated value domain.
    /// An unset field selects the empty-valued "inherit" option when the
    /// list carries one.
    pub fn render_choices(
        &self,
        entity: EntityRef,
        field: &FieldName,
    ) -> Result<Option<Vec<RenderedChoice>>, RegistryError> {
        let def = self.resolve(entity.entity_type, field)?;
        let Some(choices) = def.choices() else {
            return Ok(None);
        };
        let key = MetaKey::new(entity, def.name().clone());
        let current = self.store.get(&key)?.map(|v| v.to_form_value());
        Ok(Some(choices.render(current.as_deref())))
    }

    /// Apply a form submission to every field registered for the
    /// entity's type.
    ///
    /// Fields are processed in registration order, each through the full
    /// write pipeline, reading its own `input_name` out of the form.
    /// Per-field denials and sanitizer rejections are recorded in the
    /// report; a store failure aborts the submission.
    pub fn apply_form(
        &self,
        entity: EntityRef,
        form: &FormInput,
        principal: &Principal,
    ) -> Result<FormReport, RegistryError> {
        let mut outcomes = Vec::new();
        for def in self.fields.for_entity(entity.entity_type) {
            let raw = form.get(def.input_name());
            let disposition = match self.write(entity, def.name(), raw, principal) {
                Ok(WriteOutcome::Stored(value)) => FieldDisposition::Stored(value),
                Ok(WriteOutcome::Cleared) => FieldDisposition::Cleared,
                Err(RegistryError::Unauthorized { .. }) => FieldDisposition::Denied,
                Err(RegistryError::Rejected { source, .. }) => FieldDisposition::Rejected(source),
                Err(other) => return Err(other),
            };
            outcomes.push(FieldOutcome {
                field: def.name().clone(),
                disposition,
            });
        }
        Ok(FormReport { outcomes })
    }

    fn resolve(
        &self,
        entity_type: EntityType,
        field: &FieldName,
    ) -> Result<&MetadataField, RegistryError> {
        self.fields
            .get(entity_type, field.as_str())
            .ok_or_else(|| RegistryError::UnknownField {
                entity_type,
                name: field.clone(),
            })
    }
}
