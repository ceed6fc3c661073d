//! meta::schema
//!
//! Field declarations: descriptors, authorization policy, and the field
//! set.
//!
//! # Schema Design
//!
//! - A [`MetadataField`] is declared once and never mutated: name, entity
//!   type, sanitizer, optional choice list, authorization policy
//! - A [`FieldSet`] holds every declaration, keyed by (entity type, name),
//!   and rejects duplicates at registration time
//! - Fields carry a separate `input_name`: the key the edit form posts,
//!   which differs from the prefixed storage name (the form posts
//!   `page_header_type`; storage uses `_sunset_page_header_type`)
//!
//! # Built-ins
//!
//! [`FieldSet::with_builtins`] declares the Sunset theme's field set:
//! page header type/animation/breadcrumbs/title/paddings, the post and
//! page subtitles, and the category background color.
//!
//! # Example
//!
//! ```
//! use sunset_meta::core::sanitize::Sanitizer;
//! use sunset_meta::core::types::{EntityType, FieldName};
//! use sunset_meta::meta::{FieldSet, MetadataField};
//!
//! let mut fields = FieldSet::new();
//! let field = MetadataField::new(
//!     EntityType::Post,
//!     FieldName::new("_sunset_post_subtitle").unwrap(),
//!     Sanitizer::RichText,
//! )
//! .with_label("Subtitle")
//! .with_input_name("post_subtitle");
//!
//! fields.register(field).unwrap();
//! assert_eq!(fields.len(), 1);
//! ```

use super::registry::RegistryError;
use crate::core::choices::{
    animation_choices, breadcrumb_choices, header_type_choices, padding_choices,
    title_visibility_choices, ChoiceList,
};
use crate::core::sanitize::Sanitizer;
use crate::core::types::{EntityRef, EntityType, FieldName, ValueType};
use crate::host::{Capability, ContentRepository, Principal};

/// Storage names of the built-in Sunset fields.
pub mod builtin {
    /// Page header type (plain text, enumerated).
    pub const PAGE_HEADER_TYPE: &str = "_sunset_page_header_type";
    /// Page header animation type (plain text, enumerated).
    pub const PAGE_HEADER_ANIMATION_TYPE: &str = "_sunset_page_header_animation_type";
    /// Breadcrumbs visibility (plain text, enumerated).
    pub const PAGE_SHOW_BREADCRUMBS: &str = "_sunset_page_show_breadcrumbs";
    /// Title visibility (plain text, enumerated).
    pub const PAGE_HIDE_TITLE: &str = "_sunset_page_hide_title";
    /// Page paddings flag (boolean).
    pub const PAGE_HIDE_PADDINGS: &str = "_sunset_page_hide_paddings";
    /// Subtitle (rich text on posts, plain text on pages).
    pub const POST_SUBTITLE: &str = "_sunset_post_subtitle";
    /// Category background color (hex color).
    pub const CATEGORY_BACKGROUND: &str = "_sunset_category_background";
}

/// A field's authorization policy, evaluated on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// The principal must hold a capability with respect to the entity.
    Require(Capability),
    /// No authorization check.
    Unrestricted,
}

impl AuthPolicy {
    /// Evaluate the policy through the host's content repository.
    pub fn is_authorized(
        &self,
        content: &dyn ContentRepository,
        principal: &Principal,
        entity: EntityRef,
    ) -> bool {
        match self {
            AuthPolicy::Require(capability) => {
                content.principal_can(principal, *capability, entity)
            }
            AuthPolicy::Unrestricted => true,
        }
    }
}

/// Descriptor of one metadata field for one entity type.
///
/// Declared at startup and immutable thereafter. The default
/// authorization policy requires [`Capability::EditPosts`], matching the
/// uniform check the theme applies to every field.
#[derive(Debug, Clone)]
pub struct MetadataField {
    name: FieldName,
    entity_type: EntityType,
    label: String,
    input_name: String,
    sanitizer: Sanitizer,
    choices: Option<ChoiceList>,
    auth: AuthPolicy,
}

impl MetadataField {
    /// Create a field descriptor.
    ///
    /// The label and input name default to the storage name; override
    /// them with the builder methods.
    pub fn new(entity_type: EntityType, name: FieldName, sanitizer: Sanitizer) -> Self {
        let label = name.as_str().to_string();
        let input_name = name.as_str().to_string();
        Self {
            name,
            entity_type,
            label,
            input_name,
            sanitizer,
            choices: None,
            auth: AuthPolicy::Require(Capability::EditPosts),
        }
    }

    /// Set the human-readable label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the form input name (builder style).
    pub fn with_input_name(mut self, input_name: impl Into<String>) -> Self {
        self.input_name = input_name.into();
        self
    }

    /// Attach a choice list for an enumerated value domain (builder style).
    pub fn with_choices(mut self, choices: ChoiceList) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Set the authorization policy (builder style).
    pub fn with_auth(mut self, auth: AuthPolicy) -> Self {
        self.auth = auth;
        self
    }

    /// The storage name.
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// The entity type this field attaches to.
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// The human-readable label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The key the edit form posts for this field.
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// The sanitizer applied on every non-empty write.
    pub fn sanitizer(&self) -> Sanitizer {
        self.sanitizer
    }

    /// The choice list, for fields with an enumerated value domain.
    pub fn choices(&self) -> Option<&ChoiceList> {
        self.choices.as_ref()
    }

    /// The authorization policy.
    pub fn auth(&self) -> AuthPolicy {
        self.auth
    }

    /// The field's value domain, derived from its sanitizer.
    pub fn value_type(&self) -> ValueType {
        self.sanitizer.value_type()
    }
}

/// The full set of declared fields, fixed at startup.
///
/// Registration order is preserved; `apply_form` and iteration follow it.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: Vec<MetadataField>,
}

impl FieldSet {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field set holding the built-in Sunset fields.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`register`] so
    /// hosts can chain their own registrations.
    ///
    /// [`register`]: FieldSet::register
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let mut set = Self::new();

        set.register(
            MetadataField::new(
                EntityType::Page,
                FieldName::new(builtin::PAGE_HEADER_TYPE)?,
                Sanitizer::PlainText,
            )
            .with_label("Page header type")
            .with_input_name("page_header_type")
            .with_choices(header_type_choices()),
        )?;

        set.register(
            MetadataField::new(
                EntityType::Page,
                FieldName::new(builtin::PAGE_HEADER_ANIMATION_TYPE)?,
                Sanitizer::PlainText,
            )
            .with_label("Page header animation type")
            .with_input_name("page_header_animation_type")
            .with_choices(animation_choices()),
        )?;

        set.register(
            MetadataField::new(
                EntityType::Page,
                FieldName::new(builtin::PAGE_SHOW_BREADCRUMBS)?,
                Sanitizer::PlainText,
            )
            .with_label("Show breadcrumbs")
            .with_input_name("page_show_breadcrumbs")
            .with_choices(breadcrumb_choices()),
        )?;

        set.register(
            MetadataField::new(
                EntityType::Page,
                FieldName::new(builtin::PAGE_HIDE_TITLE)?,
                Sanitizer::PlainText,
            )
            .with_label("Hide title?")
            .with_input_name("page_hide_title")
            .with_choices(title_visibility_choices()),
        )?;

        set.register(
            MetadataField::new(
                EntityType::Page,
                FieldName::new(builtin::PAGE_HIDE_PADDINGS)?,
                Sanitizer::Boolean,
            )
            .with_label("Hide paddings?")
            .with_input_name("page_hide_paddings")
            .with_choices(padding_choices()),
        )?;

        // The subtitle key is shared across entity types but sanitized
        // differently: rich text on posts, plain text on pages.
        set.register(
            MetadataField::new(
                EntityType::Post,
                FieldName::new(builtin::POST_SUBTITLE)?,
                Sanitizer::RichText,
            )
            .with_label("Subtitle")
            .with_input_name("post_subtitle"),
        )?;

        set.register(
            MetadataField::new(
                EntityType::Page,
                FieldName::new(builtin::POST_SUBTITLE)?,
                Sanitizer::PlainText,
            )
            .with_label("Subtitle")
            .with_input_name("post_subtitle"),
        )?;

        set.register(
            MetadataField::new(
                EntityType::CategoryTerm,
                FieldName::new(builtin::CATEGORY_BACKGROUND)?,
                Sanitizer::HexColor,
            )
            .with_label("Category background")
            .with_input_name("sunset_category_background"),
        )?;

        Ok(set)
    }

    /// Register a field declaration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateField`] if the same
    /// (entity type, name) pair is already registered.
    pub fn register(&mut self, field: MetadataField) -> Result<(), RegistryError> {
        if self.get(field.entity_type(), field.name().as_str()).is_some() {
            return Err(RegistryError::DuplicateField {
                entity_type: field.entity_type(),
                name: field.name().clone(),
            });
        }
        self.fields.push(field);
        Ok(())
    }

    /// Look up a field by entity type and storage name.
    pub fn get(&self, entity_type: EntityType, name: &str) -> Option<&MetadataField> {
        self.fields
            .iter()
            .find(|f| f.entity_type() == entity_type && f.name().as_str() == name)
    }

    /// Iterate the fields declared for one entity type, in registration
    /// order.
    pub fn for_entity(&self, entity_type: EntityType) -> impl Iterator<Item = &MetadataField> {
        self.fields
            .iter()
            .filter(move |f| f.entity_type() == entity_type)
    }

    /// Iterate every declared field.
    pub fn iter(&self) -> impl Iterator<Item = &MetadataField> {
        self.fields.iter()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
