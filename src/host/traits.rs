//! host::traits
//!
//! Content repository trait: the host's capability-check seam.
//!
//! # Design
//!
//! The host application owns users and permissions; this library only
//! asks it yes/no questions. The entity being edited is part of every
//! question so a host can scope permissions per entity, even though the
//! default implementation does not.
//!
//! # Example
//!
//! ```
//! use sunset_meta::core::types::{EntityId, EntityRef, EntityType};
//! use sunset_meta::host::{Capability, CapabilityContent, ContentRepository, Principal};
//!
//! let content = CapabilityContent::new();
//! let editor = Principal::new(3).with_capability(Capability::EditPosts);
//! let page = EntityRef::new(EntityType::Page, EntityId::new(1));
//!
//! assert!(content.can_edit(&editor, page));
//! assert!(!content.can_edit(&Principal::anonymous(), page));
//! ```

use super::principal::{Capability, Principal};
use crate::core::types::EntityRef;

/// Trait for the host's permission checks.
///
/// Implementations must be thread-safe (`Send + Sync`) and side-effect
/// free: the registry may call these on every write.
pub trait ContentRepository: Send + Sync {
    /// Whether the principal holds a capability with respect to an entity.
    fn principal_can(
        &self,
        principal: &Principal,
        capability: Capability,
        entity: EntityRef,
    ) -> bool;

    /// Whether the principal may edit the entity.
    ///
    /// Convenience for the common authorization predicate.
    fn can_edit(&self, principal: &Principal, entity: EntityRef) -> bool {
        self.principal_can(principal, Capability::EditPosts, entity)
    }
}

/// Capability-set-backed content repository.
///
/// Answers every check from the principal's own capability set and
/// ignores which entity is being edited. This mirrors the theme's
/// behavior, where a single `edit_posts` check gates every field
/// regardless of the specific page, post, or term.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityContent;

impl CapabilityContent {
    /// Create a capability-backed repository.
    pub fn new() -> Self {
        Self
    }
}

impl ContentRepository for CapabilityContent {
    fn principal_can(
        &self,
        principal: &Principal,
        capability: Capability,
        _entity: EntityRef,
    ) -> bool {
        principal.can(capability)
    }
}
