//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`EntityType`] - The kind of content an item of metadata attaches to
//! - [`EntityId`] - Numeric identity of a content entity
//! - [`EntityRef`] - An (entity type, entity id) pair
//! - [`FieldName`] - Validated metadata field name
//! - [`ValueType`] - The value domain of a field
//! - [`MetadataValue`] - A stored metadata value
//! - [`RawValue`] - Untrusted input arriving from a form submission
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use sunset_meta::core::types::{EntityId, EntityRef, EntityType, FieldName};
//!
//! // Valid constructions
//! let name = FieldName::new("_sunset_page_header_type").unwrap();
//! let entity = EntityRef::new(EntityType::Page, EntityId::new(7));
//! assert_eq!(entity.to_string(), "page:7");
//!
//! // Invalid constructions fail at creation time
//! assert!(FieldName::new("").is_err());
//! assert!(FieldName::new("has space").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid field name: {0}")]
    InvalidFieldName(String),

    #[error("invalid entity type: {0}")]
    InvalidEntityType(String),

    #[error("invalid entity id: {0}")]
    InvalidEntityId(String),
}

/// The kind of content entity metadata attaches to.
///
/// The string forms ("page", "post", "category-term") appear only at
/// serialization and storage boundaries; all in-process dispatch is by
/// exhaustive match on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    /// A static page.
    Page,
    /// A blog post.
    Post,
    /// A post-category taxonomy term.
    CategoryTerm,
}

impl EntityType {
    /// The canonical string form used in storage keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Page => "page",
            EntityType::Post => "post",
            EntityType::CategoryTerm => "category-term",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(EntityType::Page),
            "post" => Ok(EntityType::Post),
            "category-term" => Ok(EntityType::CategoryTerm),
            other => Err(TypeError::InvalidEntityType(other.to_string())),
        }
    }
}

/// Numeric identity of a content entity, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Create an entity id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The underlying numeric id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A concrete content entity: an entity type plus its id.
///
/// # Example
///
/// ```
/// use sunset_meta::core::types::{EntityId, EntityRef, EntityType};
///
/// let page = EntityRef::new(EntityType::Page, EntityId::new(12));
/// assert_eq!(page.to_string(), "page:12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// The kind of entity.
    pub entity_type: EntityType,
    /// The entity's id within that kind.
    pub id: EntityId,
}

impl EntityRef {
    /// Create an entity reference.
    pub fn new(entity_type: EntityType, id: EntityId) -> Self {
        Self { entity_type, id }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.id)
    }
}

/// Maximum accepted field name length.
const FIELD_NAME_MAX_LEN: usize = 128;

/// A validated metadata field name.
///
/// Field names are the storage keys under which values persist, e.g.
/// `_sunset_page_header_type`. They must:
/// - Be non-empty and at most 128 characters
/// - Contain only ASCII alphanumerics, `_`, and `-`
///
/// # Example
///
/// ```
/// use sunset_meta::core::types::FieldName;
///
/// let name = FieldName::new("_sunset_post_subtitle").unwrap();
/// assert_eq!(name.as_str(), "_sunset_post_subtitle");
///
/// assert!(FieldName::new("").is_err());
/// assert!(FieldName::new("no spaces allowed").is_err());
/// assert!(FieldName::new("no:colons").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    /// Create a new validated field name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidFieldName` if the name is empty, too
    /// long, or contains characters outside `[A-Za-z0-9_-]`.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidFieldName(
                "field name cannot be empty".into(),
            ));
        }
        if name.len() > FIELD_NAME_MAX_LEN {
            return Err(TypeError::InvalidFieldName(format!(
                "field name cannot exceed {} characters",
                FIELD_NAME_MAX_LEN
            )));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(TypeError::InvalidFieldName(format!(
                "field name cannot contain '{}'",
                bad
            )));
        }
        Ok(())
    }

    /// The field name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for FieldName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FieldName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldName> for String {
    fn from(value: FieldName) -> Self {
        value.0
    }
}

/// The value domain of a metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueType {
    /// Plain text with markup stripped.
    PlainText,
    /// Allowlist-filtered HTML.
    RichText,
    /// A true/false flag.
    Boolean,
}

/// A stored metadata value.
///
/// Serialized untagged, so text values persist as JSON strings and flags
/// as JSON booleans.
///
/// Absence of a stored value is represented as `Option<MetadataValue>`
/// being `None` at the read API, never as a variant here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// A textual value (plain or rich text).
    Text(String),
    /// A boolean flag.
    Bool(bool),
}

impl MetadataValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        MetadataValue::Text(value.into())
    }

    /// The textual content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            MetadataValue::Bool(_) => None,
        }
    }

    /// The flag, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetadataValue::Bool(b) => Some(*b),
            MetadataValue::Text(_) => None,
        }
    }

    /// The value as it appears in a form control.
    ///
    /// Booleans map to `"1"`/`"0"`, matching the choice-list values the
    /// editor renders for flag fields.
    pub fn to_form_value(&self) -> String {
        match self {
            MetadataValue::Text(s) => s.clone(),
            MetadataValue::Bool(true) => "1".to_string(),
            MetadataValue::Bool(false) => "0".to_string(),
        }
    }
}

/// Untrusted raw input for a single field, as read from a form submission.
///
/// `Missing` means the submission did not carry the field at all. Both
/// `Missing` and an empty text value trigger the delete-on-empty write
/// policy.
///
/// # Example
///
/// ```
/// use sunset_meta::core::types::RawValue;
///
/// assert!(RawValue::Missing.is_empty());
/// assert!(RawValue::text("").is_empty());
/// assert!(!RawValue::text("cover").is_empty());
/// assert!(!RawValue::Bool(false).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// A textual value from a text control or select.
    Text(String),
    /// A boolean value from a checkbox or toggle.
    Bool(bool),
    /// The field was absent from the submission.
    Missing,
}

impl RawValue {
    /// Create a raw text value.
    pub fn text(value: impl Into<String>) -> Self {
        RawValue::Text(value.into())
    }

    /// Whether this input triggers the delete-on-empty policy.
    ///
    /// `Bool(false)` is a real value, not an empty one.
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Missing => true,
            RawValue::Text(s) => s.is_empty(),
            RawValue::Bool(_) => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

/// An RFC3339 UTC timestamp.
///
/// # Example
///
/// ```
/// use sunset_meta::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// assert!(now.to_string().contains('T'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_round_trips_through_str() {
        for et in [EntityType::Page, EntityType::Post, EntityType::CategoryTerm] {
            let parsed: EntityType = et.as_str().parse().unwrap();
            assert_eq!(parsed, et);
        }
    }

    #[test]
    fn entity_type_rejects_unknown() {
        let err = "widget".parse::<EntityType>().unwrap_err();
        assert_eq!(err, TypeError::InvalidEntityType("widget".into()));
    }

    #[test]
    fn entity_ref_display() {
        let entity = EntityRef::new(EntityType::CategoryTerm, EntityId::new(3));
        assert_eq!(entity.to_string(), "category-term:3");
    }

    #[test]
    fn field_name_accepts_builtin_shapes() {
        for name in [
            "_sunset_page_header_type",
            "_sunset_category_background",
            "page_show_breadcrumbs",
            "a",
        ] {
            assert!(FieldName::new(name).is_ok(), "{} should be valid", name);
        }
    }

    #[test]
    fn field_name_rejects_invalid() {
        assert!(FieldName::new("").is_err());
        assert!(FieldName::new("has space").is_err());
        assert!(FieldName::new("colon:bad").is_err());
        assert!(FieldName::new("slash/bad").is_err());
        assert!(FieldName::new("a".repeat(129)).is_err());
    }

    #[test]
    fn field_name_serde_validates_on_deserialize() {
        let ok: FieldName = serde_json::from_str("\"_sunset_post_subtitle\"").unwrap();
        assert_eq!(ok.as_str(), "_sunset_post_subtitle");

        let bad: Result<FieldName, _> = serde_json::from_str("\"not valid\"");
        assert!(bad.is_err());
    }

    #[test]
    fn metadata_value_untagged_serde() {
        let text = MetadataValue::text("cover");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"cover\"");

        let flag = MetadataValue::Bool(true);
        assert_eq!(serde_json::to_string(&flag).unwrap(), "true");

        let parsed: MetadataValue = serde_json::from_str("false").unwrap();
        assert_eq!(parsed, MetadataValue::Bool(false));
        let parsed: MetadataValue = serde_json::from_str("\"split\"").unwrap();
        assert_eq!(parsed, MetadataValue::text("split"));
    }

    #[test]
    fn form_value_projection() {
        assert_eq!(MetadataValue::text("zoom-in").to_form_value(), "zoom-in");
        assert_eq!(MetadataValue::Bool(true).to_form_value(), "1");
        assert_eq!(MetadataValue::Bool(false).to_form_value(), "0");
    }

    #[test]
    fn raw_value_emptiness() {
        assert!(RawValue::Missing.is_empty());
        assert!(RawValue::text("").is_empty());
        assert!(!RawValue::text(" ").is_empty());
        assert!(!RawValue::Bool(false).is_empty());
    }

    #[test]
    fn timestamp_serde_round_trip() {
        let ts = UtcTimestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: UtcTimestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }
}
