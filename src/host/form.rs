//! host::form
//!
//! Form submission input.
//!
//! # Design
//!
//! The host's request layer collects whatever the editor posted into a
//! [`FormInput`]: a flat mapping of input names to raw values. The
//! registry only ever reads named keys out of it; it never sees or parses
//! the full request. A key the form does not carry reads as
//! [`RawValue::Missing`], which the write path turns into a delete.
//!
//! # Example
//!
//! ```
//! use sunset_meta::core::types::RawValue;
//! use sunset_meta::host::FormInput;
//!
//! let form = FormInput::new()
//!     .with_text("page_header_type", "cover")
//!     .with_flag("page_hide_paddings", true);
//!
//! assert_eq!(form.get("page_header_type"), RawValue::text("cover"));
//! assert_eq!(form.get("page_hide_paddings"), RawValue::Bool(true));
//! assert_eq!(form.get("absent"), RawValue::Missing);
//! ```

use std::collections::HashMap;

use crate::core::types::RawValue;

/// A submitted form: input names mapped to raw, untrusted values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    values: HashMap<String, RawValue>,
}

impl FormInput {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw value under an input name.
    pub fn insert(&mut self, name: impl Into<String>, value: RawValue) {
        self.values.insert(name.into(), value);
    }

    /// Add a text input (builder style).
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, RawValue::text(value));
        self
    }

    /// Add a flag input (builder style).
    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.insert(name, RawValue::Bool(value));
        self
    }

    /// The raw value for an input name.
    ///
    /// Returns [`RawValue::Missing`] if the form does not carry the name.
    pub fn get(&self, name: &str) -> RawValue {
        self.values.get(name).cloned().unwrap_or(RawValue::Missing)
    }

    /// Whether the form carries an input name at all.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of carried inputs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the form carries no inputs.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, RawValue)> for FormInput {
    fn from_iter<T: IntoIterator<Item = (String, RawValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
