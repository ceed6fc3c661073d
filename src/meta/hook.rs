//! meta::hook
//!
//! Save-event hook that persists registered metadata on form submission.
//!
//! # Design
//!
//! [`MetadataSaveHook`] is the glue between the host's save lifecycle and
//! the registry: on every [`SaveEvent`] it applies the submitted form to
//! the fields registered for the saved entity's type. Store failures and
//! per-field problems both surface as a [`HookError`], which the
//! dispatcher collects without stopping other hooks.
//!
//! # Example
//!
//! ```
//! use sunset_meta::core::types::{EntityId, EntityRef, EntityType};
//! use sunset_meta::host::{
//!     Capability, CapabilityContent, FormInput, Principal, SaveDispatcher, SaveEvent,
//! };
//! use sunset_meta::meta::{FieldSet, MetadataRegistry, MetadataSaveHook};
//! use sunset_meta::store::MemoryStore;
//!
//! let fields = FieldSet::with_builtins().unwrap();
//! let store = MemoryStore::new();
//! let content = CapabilityContent::new();
//! let registry = MetadataRegistry::new(&fields, &store, &content);
//! let hook = MetadataSaveHook::new(&registry);
//!
//! let mut dispatcher = SaveDispatcher::new();
//! dispatcher.register(&hook);
//!
//! let event = SaveEvent::new(
//!     EntityRef::new(EntityType::Page, EntityId::new(7)),
//!     FormInput::new().with_text("page_header_type", "cover"),
//!     Principal::new(1).with_capability(Capability::EditPosts),
//! );
//! assert!(dispatcher.dispatch(&event).is_empty());
//! assert_eq!(store.len(), 1);
//! ```

use super::registry::MetadataRegistry;
use crate::host::{HookError, SaveEvent, SaveHook};

/// Save hook persisting registered metadata fields.
pub struct MetadataSaveHook<'a> {
    registry: &'a MetadataRegistry<'a>,
}

impl<'a> MetadataSaveHook<'a> {
    /// Create a hook over a registry.
    pub fn new(registry: &'a MetadataRegistry<'a>) -> Self {
        Self { registry }
    }
}

impl SaveHook for MetadataSaveHook<'_> {
    fn on_save(&self, event: &SaveEvent) -> Result<(), HookError> {
        let report = self
            .registry
            .apply_form(event.entity, &event.form, &event.principal)
            .map_err(|e| HookError(e.to_string()))?;

        if report.is_clean() {
            return Ok(());
        }
        let names: Vec<&str> = report.problems().map(|n| n.as_str()).collect();
        Err(HookError(format!(
            "{} field(s) not saved: {}",
            names.len(),
            names.join(", ")
        )))
    }
}
