//! host::principal
//!
//! The acting principal and its capabilities.
//!
//! # Design
//!
//! A [`Principal`] is whoever the host says is performing the current
//! request. Capabilities are a closed enum rather than free-form strings,
//! so authorization policies dispatch exhaustively and a typo cannot
//! silently grant or deny access.
//!
//! # Example
//!
//! ```
//! use sunset_meta::host::{Capability, Principal};
//!
//! let editor = Principal::new(7).with_capability(Capability::EditPosts);
//! assert!(editor.can(Capability::EditPosts));
//! assert!(!editor.can(Capability::ManageCategories));
//!
//! let visitor = Principal::anonymous();
//! assert!(!visitor.can(Capability::EditPosts));
//! ```

use std::collections::HashSet;

/// A capability a principal may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// May edit posts and pages.
    EditPosts,
    /// May manage taxonomy terms.
    ManageCategories,
}

impl Capability {
    /// The host-facing string form of the capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::EditPosts => "edit_posts",
            Capability::ManageCategories => "manage_categories",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The acting user or agent whose permissions gate a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    id: u64,
    capabilities: HashSet<Capability>,
}

impl Principal {
    /// Create a principal with no capabilities.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            capabilities: HashSet::new(),
        }
    }

    /// The anonymous principal (id 0, no capabilities).
    pub fn anonymous() -> Self {
        Self::new(0)
    }

    /// Grant a capability (builder style).
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    /// The host-assigned principal id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the principal holds a capability.
    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_are_per_principal() {
        let editor = Principal::new(1).with_capability(Capability::EditPosts);
        let admin = Principal::new(2)
            .with_capability(Capability::EditPosts)
            .with_capability(Capability::ManageCategories);

        assert!(editor.can(Capability::EditPosts));
        assert!(!editor.can(Capability::ManageCategories));
        assert!(admin.can(Capability::ManageCategories));
    }

    #[test]
    fn anonymous_has_nothing() {
        let anon = Principal::anonymous();
        assert_eq!(anon.id(), 0);
        assert!(!anon.can(Capability::EditPosts));
        assert!(!anon.can(Capability::ManageCategories));
    }

    #[test]
    fn capability_string_forms() {
        assert_eq!(Capability::EditPosts.as_str(), "edit_posts");
        assert_eq!(Capability::ManageCategories.to_string(), "manage_categories");
    }
}
