//! Sunset Meta - metadata field registry for the Sunset theme
//!
//! Sunset Meta is the in-process metadata core behind the Sunset theme's
//! editor integration: a registry of typed metadata fields attached to
//! content entities (pages, posts, category terms), with sanitization,
//! authorization, and delete-on-empty persistence semantics.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`core`] - Domain types, sanitizers, choice lists, and configuration
//! - [`meta`] - Field declarations and the metadata registry itself
//! - [`store`] - Abstraction over the host's durable metadata store
//! - [`host`] - Host collaborator seams: principals, forms, save events
//!
//! # Correctness Invariants
//!
//! Sunset Meta maintains the following invariants:
//!
//! 1. Values are mutated only through the registry's write path, so
//!    sanitization and authorization are always applied
//! 2. A value is never persisted for a field whose authorization policy
//!    denies the acting principal
//! 3. An empty or absent raw value deletes the stored entry; unset is
//!    distinct from a stored empty value
//! 4. Field declarations are fixed at startup and immutable thereafter
//!
//! # Example
//!
//! ```
//! use sunset_meta::core::types::{EntityRef, EntityType, EntityId, RawValue};
//! use sunset_meta::host::{CapabilityContent, Capability, Principal};
//! use sunset_meta::meta::{FieldSet, MetadataRegistry};
//! use sunset_meta::store::MemoryStore;
//!
//! let fields = FieldSet::with_builtins().unwrap();
//! let store = MemoryStore::new();
//! let content = CapabilityContent::new();
//! let registry = MetadataRegistry::new(&fields, &store, &content);
//!
//! let editor = Principal::new(7).with_capability(Capability::EditPosts);
//! let page = EntityRef::new(EntityType::Page, EntityId::new(42));
//! let subtitle = "_sunset_post_subtitle".parse().unwrap();
//!
//! // The page-scoped subtitle field is plain text: markup is stripped.
//! registry
//!     .write(page, &subtitle, RawValue::text("<b>Hello</b>"), &editor)
//!     .unwrap();
//! let value = registry.read(page, &subtitle).unwrap();
//! assert_eq!(value.unwrap().to_form_value(), "Hello");
//! ```

pub mod core;
pub mod host;
pub mod meta;
pub mod store;
