//! meta
//!
//! Field declarations and the registry gating all metadata access.
//!
//! # Modules
//!
//! - [`schema`] - Field descriptors, authorization policy, the field set
//! - [`registry`] - The read/write gate over the metadata store
//! - [`hook`] - Save-event integration with the host lifecycle
//!
//! # Architecture
//!
//! Fields are declared up front in a [`FieldSet`], usually via
//! [`FieldSet::with_builtins`]. A [`MetadataRegistry`] then mediates every
//! read and write: nothing reaches the store without passing the declared
//! field's authorization policy and sanitizer. [`MetadataSaveHook`] plugs
//! the registry into the host's save events so whole form submissions are
//! applied in one call.

pub mod hook;
pub mod registry;
pub mod schema;

pub use hook::MetadataSaveHook;
pub use registry::{
    FieldDisposition, FieldOutcome, FormReport, MetadataRegistry, RegistryError, WriteOutcome,
};
pub use schema::{builtin, AuthPolicy, FieldSet, MetadataField};
