//! core
//!
//! Core domain types, sanitizers, and configuration for Sunset Meta.
//!
//! # Modules
//!
//! - [`types`] - Strong types: EntityType, FieldName, MetadataValue, etc.
//! - [`sanitize`] - Pure value sanitizers applied on every write
//! - [`choices`] - Ordered option lists for enumerated fields
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Sanitizers are pure and dispatched exhaustively
//! - String-keyed branching stays at serialization boundaries

pub mod choices;
pub mod config;
pub mod sanitize;
pub mod types;
