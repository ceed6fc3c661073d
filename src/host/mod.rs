//! host
//!
//! Seams to the host content-management application.
//!
//! # Modules
//!
//! - [`principal`] - The acting principal and its capabilities
//! - [`traits`] - The content repository (capability checks)
//! - [`form`] - Form submission input
//! - [`events`] - Typed save events and hook dispatch
//!
//! # Architecture
//!
//! Everything the registry needs from its host flows through these types:
//! the host supplies the acting [`Principal`] and answers permission
//! questions via [`ContentRepository`]; the request layer hands over a
//! [`FormInput`]; lifecycle notifications arrive as typed [`SaveEvent`]s
//! instead of string-named callbacks.

pub mod events;
pub mod form;
pub mod principal;
pub mod traits;

pub use events::{HookError, SaveDispatcher, SaveEvent, SaveHook};
pub use form::FormInput;
pub use principal::{Capability, Principal};
pub use traits::{CapabilityContent, ContentRepository};
