//! core::choices
//!
//! Ordered option lists for fields with an enumerated value domain.
//!
//! # Design
//!
//! A [`ChoiceList`] is declared once per field and never changes at
//! runtime. Rendering is a pure projection: given the current stored value
//! (or none), it produces the ordered options with exactly one marked
//! selected. An empty-valued option, conventionally labeled "Inherit from
//! theme's options", matches the unset state.
//!
//! The built-in lists mirror the editor controls the Sunset theme ships
//! for its page header, animation, breadcrumb, title, and padding fields.
//!
//! # Example
//!
//! ```
//! use sunset_meta::core::choices::header_type_choices;
//!
//! let rendered = header_type_choices().render(Some("cover"));
//! let selected: Vec<_> = rendered.iter().filter(|c| c.selected).collect();
//! assert_eq!(selected.len(), 1);
//! assert_eq!(selected[0].value, "cover");
//! ```

/// A single selectable option: a stored value and its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// The value persisted when this option is chosen. Empty means
    /// "inherit / unset".
    pub value: String,
    /// Human-readable label.
    pub label: String,
}

impl Choice {
    /// Create a choice.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A choice as rendered against the current stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChoice {
    /// The option's stored value.
    pub value: String,
    /// Human-readable label.
    pub label: String,
    /// Whether this option matches the current stored value.
    pub selected: bool,
}

/// An ordered list of selectable options for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceList {
    choices: Vec<Choice>,
}

impl ChoiceList {
    /// Build a choice list from ordered (value, label) pairs.
    pub fn new<V, L>(pairs: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        Self {
            choices: pairs
                .into_iter()
                .map(|(value, label)| Choice::new(value, label))
                .collect(),
        }
    }

    /// Iterate the options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter()
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Whether the list has no options.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Whether a value appears in the list.
    pub fn contains(&self, value: &str) -> bool {
        self.choices.iter().any(|c| c.value == value)
    }

    /// Render the list against the current stored value.
    ///
    /// `None` (unset) selects the empty-valued option if one exists. At
    /// most one option is marked selected; a stored value outside the list
    /// selects nothing.
    pub fn render(&self, current: Option<&str>) -> Vec<RenderedChoice> {
        let current = current.unwrap_or("");
        self.choices
            .iter()
            .map(|c| RenderedChoice {
                value: c.value.clone(),
                label: c.label.clone(),
                selected: c.value == current,
            })
            .collect()
    }
}

/// Label shared by every inherit/unset option.
const INHERIT_LABEL: &str = "Inherit from theme's options";

/// Options for the page header type field.
pub fn header_type_choices() -> ChoiceList {
    ChoiceList::new([
        ("", INHERIT_LABEL),
        ("default", "Default"),
        ("cover", "Cover"),
        ("split", "Split"),
        ("big-text", "Big text"),
    ])
}

/// Options for the page header animation field.
pub fn animation_choices() -> ChoiceList {
    ChoiceList::new([
        ("", INHERIT_LABEL),
        ("none", "None"),
        ("slide-up", "Slide Up"),
        ("slide-down", "Slide Down"),
        ("typing", "Typing"),
        ("zoom-in", "Zoom In"),
        ("fade-in", "Fade In"),
    ])
}

/// Options for the breadcrumbs visibility field.
pub fn breadcrumb_choices() -> ChoiceList {
    ChoiceList::new([("", INHERIT_LABEL), ("1", "Show"), ("0", "Hide")])
}

/// Options for the title visibility field.
pub fn title_visibility_choices() -> ChoiceList {
    ChoiceList::new([("0", "Show"), ("1", "Hide")])
}

/// Options for the page paddings field.
pub fn padding_choices() -> ChoiceList {
    ChoiceList::new([("", INHERIT_LABEL), ("1", "Show"), ("0", "Hide")])
}
