//! host::events
//!
//! Typed save events replacing string-named lifecycle callbacks.
//!
//! # Design
//!
//! The host emits a [`SaveEvent`] when an entity's edit form is submitted
//! (page or post saved, term created or edited). Interested parties
//! implement [`SaveHook`] and register with a [`SaveDispatcher`]; the
//! dispatcher is just a typed fan-out, not a queue. Every hook runs even
//! if an earlier one fails, and the dispatcher reports the collected
//! failures to the caller.
//!
//! # Example
//!
//! ```
//! use sunset_meta::core::types::{EntityId, EntityRef, EntityType};
//! use sunset_meta::host::{FormInput, Principal, SaveDispatcher, SaveEvent, SaveHook, HookError};
//!
//! struct CountingHook(std::sync::atomic::AtomicUsize);
//!
//! impl SaveHook for CountingHook {
//!     fn on_save(&self, _event: &SaveEvent) -> Result<(), HookError> {
//!         self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
//!         Ok(())
//!     }
//! }
//!
//! let hook = CountingHook(Default::default());
//! let mut dispatcher = SaveDispatcher::new();
//! dispatcher.register(&hook);
//!
//! let event = SaveEvent::new(
//!     EntityRef::new(EntityType::Post, EntityId::new(1)),
//!     FormInput::new(),
//!     Principal::anonymous(),
//! );
//! assert!(dispatcher.dispatch(&event).is_empty());
//! ```

use thiserror::Error;

use super::form::FormInput;
use super::principal::Principal;
use crate::core::types::EntityRef;

/// Error raised by a save hook.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("save hook failed: {0}")]
pub struct HookError(pub String);

/// An entity's edit form was submitted.
#[derive(Debug, Clone)]
pub struct SaveEvent {
    /// The entity being saved.
    pub entity: EntityRef,
    /// The submitted form.
    pub form: FormInput,
    /// Who is saving.
    pub principal: Principal,
}

impl SaveEvent {
    /// Create a save event.
    pub fn new(entity: EntityRef, form: FormInput, principal: Principal) -> Self {
        Self {
            entity,
            form,
            principal,
        }
    }
}

/// A party interested in save events.
pub trait SaveHook: Sync {
    /// Handle a save event.
    ///
    /// # Errors
    ///
    /// Returns a [`HookError`] describing why handling failed; other
    /// hooks still run.
    fn on_save(&self, event: &SaveEvent) -> Result<(), HookError>;
}

/// Typed fan-out of save events to registered hooks.
///
/// Hooks run synchronously, in registration order, within the saving
/// request. Nothing is queued or retried.
#[derive(Default)]
pub struct SaveDispatcher<'a> {
    hooks: Vec<&'a dyn SaveHook>,
}

impl<'a> SaveDispatcher<'a> {
    /// Create a dispatcher with no hooks.
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a hook.
    pub fn register(&mut self, hook: &'a dyn SaveHook) {
        self.hooks.push(hook);
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Dispatch an event to every hook.
    ///
    /// Returns the errors raised, in hook order; an empty vector means
    /// every hook succeeded.
    pub fn dispatch(&self, event: &SaveEvent) -> Vec<HookError> {
        self.hooks
            .iter()
            .filter_map(|hook| hook.on_save(event).err())
            .collect()
    }
}
