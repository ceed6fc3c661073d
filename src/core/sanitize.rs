//! core::sanitize
//!
//! Pure sanitizers enforcing each field's value-type contract before
//! persistence.
//!
//! # Design
//!
//! Every registered field carries exactly one [`Sanitizer`] variant, and
//! the registry dispatches on it with an exhaustive match. Sanitizers are
//! pure: the same raw input always produces the same result, and nothing
//! here touches the store.
//!
//! Text filters (plain and rich) are total over text input: they clean
//! rather than reject. Shape-checked filters (boolean, hex color) reject
//! input that cannot be coerced, and the registry then leaves the field
//! unset instead of persisting invalid data.
//!
//! # Example
//!
//! ```
//! use sunset_meta::core::sanitize::Sanitizer;
//! use sunset_meta::core::types::{MetadataValue, RawValue};
//!
//! let clean = Sanitizer::PlainText
//!     .apply(&RawValue::text("<b>Hello</b>  world"))
//!     .unwrap();
//! assert_eq!(clean, MetadataValue::text("Hello world"));
//!
//! assert!(Sanitizer::HexColor.apply(&RawValue::text("notacolor")).is_err());
//! ```

use thiserror::Error;

use super::types::{MetadataValue, RawValue, ValueType};

/// Errors from sanitization.
///
/// A sanitizer error means the input failed type coercion; the write path
/// treats it as a rejected write and never stores the offending value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanitizeError {
    /// The value is not a hex color (`#` plus 3 or 6 hex digits).
    #[error("not a hex color: {0}")]
    InvalidHexColor(String),

    /// The value is not a recognized boolean token.
    #[error("not a boolean: {0}")]
    InvalidBoolean(String),

    /// A boolean raw value arrived for a text-shaped field.
    #[error("expected text input for {0} field")]
    ExpectedText(&'static str),

    /// There was no input to sanitize.
    ///
    /// The write path handles empty input through the delete-on-empty
    /// policy before sanitization, so seeing this indicates a caller bug.
    #[error("no input to sanitize")]
    MissingInput,
}

/// A field's sanitizer, applied to every non-empty write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
    /// Strip markup, drop control characters, collapse whitespace.
    PlainText,
    /// Filter HTML through the post-safe tag allowlist.
    RichText,
    /// Coerce boolean flags and their textual tokens.
    Boolean,
    /// Accept `#` plus 3 or 6 hex digits, normalized to lowercase.
    HexColor,
}

impl Sanitizer {
    /// The value domain this sanitizer produces.
    pub fn value_type(&self) -> ValueType {
        match self {
            Sanitizer::PlainText => ValueType::PlainText,
            Sanitizer::RichText => ValueType::RichText,
            Sanitizer::Boolean => ValueType::Boolean,
            Sanitizer::HexColor => ValueType::PlainText,
        }
    }

    /// Apply the sanitizer to a raw value.
    ///
    /// # Errors
    ///
    /// - [`SanitizeError::InvalidHexColor`] / [`SanitizeError::InvalidBoolean`]
    ///   when the input fails type coercion
    /// - [`SanitizeError::ExpectedText`] when a flag arrives for a text field
    /// - [`SanitizeError::MissingInput`] when called with an absent value
    pub fn apply(&self, raw: &RawValue) -> Result<MetadataValue, SanitizeError> {
        match (self, raw) {
            (_, RawValue::Missing) => Err(SanitizeError::MissingInput),

            (Sanitizer::PlainText, RawValue::Text(s)) => {
                Ok(MetadataValue::Text(plain_text(s)))
            }
            (Sanitizer::PlainText, RawValue::Bool(_)) => {
                Err(SanitizeError::ExpectedText("plain text"))
            }

            (Sanitizer::RichText, RawValue::Text(s)) => {
                Ok(MetadataValue::Text(filter_html(s)))
            }
            (Sanitizer::RichText, RawValue::Bool(_)) => {
                Err(SanitizeError::ExpectedText("rich text"))
            }

            (Sanitizer::Boolean, RawValue::Bool(b)) => Ok(MetadataValue::Bool(*b)),
            (Sanitizer::Boolean, RawValue::Text(s)) => {
                parse_bool_token(s).map(MetadataValue::Bool)
            }

            (Sanitizer::HexColor, RawValue::Text(s)) => {
                sanitize_hex_color(s).map(MetadataValue::Text)
            }
            (Sanitizer::HexColor, RawValue::Bool(_)) => {
                Err(SanitizeError::ExpectedText("hex color"))
            }
        }
    }
}

/// Strip all HTML tags from the input.
///
/// Complete `<...>` spans are removed. A dangling `<` with no closing `>`
/// drops the remainder of the input, so markup fragments can never leak
/// through.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Sanitize to plain text: strip tags, drop control characters, collapse
/// whitespace runs to single spaces, and trim.
pub fn plain_text(input: &str) -> String {
    let stripped = strip_tags(input);
    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    for c in stripped.chars() {
        if c.is_whitespace() || c.is_control() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    out
}

/// Tags allowed through the rich-text filter, with their allowed attributes.
///
/// This is the post-safe subset the theme's subtitle field accepts.
const ALLOWED_TAGS: &[(&str, &[&str])] = &[
    ("a", &["href", "title"]),
    ("abbr", &["title"]),
    ("b", &[]),
    ("blockquote", &[]),
    ("br", &[]),
    ("code", &[]),
    ("del", &[]),
    ("em", &[]),
    ("h1", &[]),
    ("h2", &[]),
    ("h3", &[]),
    ("h4", &[]),
    ("h5", &[]),
    ("h6", &[]),
    ("i", &[]),
    ("img", &["src", "alt", "title"]),
    ("li", &[]),
    ("ol", &[]),
    ("p", &[]),
    ("pre", &[]),
    ("s", &[]),
    ("span", &[]),
    ("strong", &[]),
    ("ul", &[]),
];

fn allowed_attrs(tag: &str) -> Option<&'static [&'static str]> {
    ALLOWED_TAGS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, attrs)| *attrs)
}

/// Filter HTML through the post-safe allowlist.
///
/// Disallowed tags are removed while their inner text is kept. Allowed
/// tags are re-emitted with only their allowed attributes, and URL-bearing
/// attributes reject unsafe schemes.
pub fn filter_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = match after.find('>') {
            Some(pos) => pos,
            // Dangling '<': drop the remainder, same as strip_tags.
            None => return out,
        };
        let tag_body = &after[..close];
        rest = &after[close + 1..];
        emit_tag(tag_body, &mut out);
    }
    out.push_str(rest);
    out
}

/// Re-emit a single tag body if it survives the allowlist.
fn emit_tag(tag_body: &str, out: &mut String) {
    let body = tag_body.trim();
    if body.is_empty() || body.starts_with('!') {
        // Comments and doctypes never survive.
        return;
    }

    if let Some(name) = body.strip_prefix('/') {
        let name = name.trim().to_ascii_lowercase();
        if allowed_attrs(&name).is_some() {
            out.push_str("</");
            out.push_str(&name);
            out.push('>');
        }
        return;
    }

    let self_closing = body.ends_with('/');
    let body = body.trim_end_matches('/').trim_end();

    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();
    let allowed = match allowed_attrs(&name) {
        Some(attrs) => attrs,
        None => return,
    };

    out.push('<');
    out.push_str(&name);
    for (attr, value) in parse_attributes(&body[name_len..]) {
        if !allowed.contains(&attr.as_str()) {
            continue;
        }
        if matches!(attr.as_str(), "href" | "src") && !url_allowed(&value) {
            continue;
        }
        out.push(' ');
        out.push_str(&attr);
        out.push_str("=\"");
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
}

/// Parse `name="value"` attribute pairs from a tag body remainder.
///
/// Values may be double-quoted, single-quoted, or bare. Attributes without
/// a value parse as an empty value.
fn parse_attributes(input: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        // Attribute name
        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                end = i + c.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        if end == start {
            // Not a name character; skip it to make progress.
            chars.next();
            continue;
        }
        let name = input[start..end].to_ascii_lowercase();

        // Optional '=' and value
        while matches!(chars.peek(), Some(&(_, c)) if c.is_whitespace()) {
            chars.next();
        }
        let mut value = String::new();
        if matches!(chars.peek(), Some(&(_, '='))) {
            chars.next();
            while matches!(chars.peek(), Some(&(_, c)) if c.is_whitespace()) {
                chars.next();
            }
            match chars.peek() {
                Some(&(_, quote @ ('"' | '\''))) => {
                    chars.next();
                    for (_, c) in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        value.push(c);
                    }
                }
                _ => {
                    while let Some(&(_, c)) = chars.peek() {
                        if c.is_whitespace() {
                            break;
                        }
                        value.push(c);
                        chars.next();
                    }
                }
            }
        }
        pairs.push((name, value));
    }
    pairs
}

/// Whether a URL is safe to carry in an `href`/`src` attribute.
///
/// Relative URLs and fragment/query references are allowed; absolute URLs
/// must use the http, https, or mailto scheme.
fn url_allowed(url: &str) -> bool {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    match lower.find(':') {
        None => true,
        Some(pos) => {
            // A ':' after '/', '?', or '#' is part of a path, not a scheme.
            let scheme_end = lower
                .find(['/', '?', '#'])
                .unwrap_or(lower.len());
            if pos > scheme_end {
                return true;
            }
            matches!(&lower[..pos], "http" | "https" | "mailto")
        }
    }
}

/// Coerce a textual boolean token.
fn parse_bool_token(input: &str) -> Result<bool, SanitizeError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SanitizeError::InvalidBoolean(input.to_string())),
    }
}

/// Validate a hex color string.
///
/// Accepts `#` followed by exactly 3 or 6 hex digits; the result is
/// normalized to lowercase.
fn sanitize_hex_color(input: &str) -> Result<String, SanitizeError> {
    let trimmed = input.trim();
    let digits = match trimmed.strip_prefix('#') {
        Some(d) => d,
        None => return Err(SanitizeError::InvalidHexColor(input.to_string())),
    };
    let valid_len = digits.len() == 3 || digits.len() == 6;
    if !valid_len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SanitizeError::InvalidHexColor(input.to_string()));
    }
    Ok(format!("#{}", digits.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_tags_removes_complete_spans() {
        assert_eq!(strip_tags("<b>Hello</b>"), "Hello");
        assert_eq!(strip_tags("a <i>b</i> c"), "a b c");
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn strip_tags_drops_dangling_fragment() {
        assert_eq!(strip_tags("safe <script src="), "safe ");
    }

    #[test]
    fn plain_text_collapses_whitespace() {
        assert_eq!(plain_text("  a \t b\nc  "), "a b c");
        assert_eq!(plain_text("<p> spaced   out </p>"), "spaced out");
    }

    #[test]
    fn plain_text_drops_control_characters() {
        assert_eq!(plain_text("a\u{0}b\u{7}c"), "a b c");
    }

    #[test]
    fn plain_text_is_idempotent() {
        let once = plain_text("<em>x</em>  y\tz");
        assert_eq!(plain_text(&once), once);
    }

    #[test]
    fn filter_html_keeps_allowed_tags() {
        assert_eq!(filter_html("<b>bold</b>"), "<b>bold</b>");
        assert_eq!(
            filter_html("<p>para <strong>strong</strong></p>"),
            "<p>para <strong>strong</strong></p>"
        );
    }

    #[test]
    fn filter_html_drops_disallowed_tags_keeping_text() {
        assert_eq!(filter_html("<script>alert(1)</script>"), "alert(1)");
        assert_eq!(filter_html("<div>inner</div>"), "inner");
    }

    #[test]
    fn filter_html_strips_disallowed_attributes() {
        assert_eq!(
            filter_html("<b onclick=\"evil()\">x</b>"),
            "<b>x</b>"
        );
        assert_eq!(
            filter_html("<a href=\"https://example.com\" onclick=\"evil()\">x</a>"),
            "<a href=\"https://example.com\">x</a>"
        );
    }

    #[test]
    fn filter_html_rejects_unsafe_urls() {
        assert_eq!(
            filter_html("<a href=\"javascript:alert(1)\">x</a>"),
            "<a>x</a>"
        );
        assert_eq!(
            filter_html("<a href=\"/relative/path\">x</a>"),
            "<a href=\"/relative/path\">x</a>"
        );
        assert_eq!(
            filter_html("<a href=\"mailto:hi@example.com\">x</a>"),
            "<a href=\"mailto:hi@example.com\">x</a>"
        );
    }

    #[test]
    fn filter_html_normalizes_case_and_quotes() {
        assert_eq!(
            filter_html("<A HREF='https://example.com'>x</A>"),
            "<a href=\"https://example.com\">x</a>"
        );
    }

    #[test]
    fn filter_html_drops_comments() {
        assert_eq!(filter_html("a<!-- hidden -->b"), "ab");
    }

    #[test]
    fn filter_html_keeps_self_closing_br() {
        assert_eq!(filter_html("line<br/>break"), "line<br />break");
    }

    #[test]
    fn boolean_accepts_tokens() {
        for s in ["1", "true", "YES", " on "] {
            assert_eq!(
                Sanitizer::Boolean.apply(&RawValue::text(s)).unwrap(),
                MetadataValue::Bool(true),
                "{} should be true",
                s
            );
        }
        for s in ["0", "false", "No", "off"] {
            assert_eq!(
                Sanitizer::Boolean.apply(&RawValue::text(s)).unwrap(),
                MetadataValue::Bool(false),
                "{} should be false",
                s
            );
        }
    }

    #[test]
    fn boolean_rejects_garbage() {
        let err = Sanitizer::Boolean
            .apply(&RawValue::text("maybe"))
            .unwrap_err();
        assert_eq!(err, SanitizeError::InvalidBoolean("maybe".into()));
    }

    #[test]
    fn boolean_passes_flags_through() {
        assert_eq!(
            Sanitizer::Boolean.apply(&RawValue::Bool(true)).unwrap(),
            MetadataValue::Bool(true)
        );
    }

    #[test]
    fn hex_color_accepts_short_and_long_forms() {
        assert_eq!(
            Sanitizer::HexColor.apply(&RawValue::text("#FFF")).unwrap(),
            MetadataValue::text("#fff")
        );
        assert_eq!(
            Sanitizer::HexColor
                .apply(&RawValue::text("#1A2b3C"))
                .unwrap(),
            MetadataValue::text("#1a2b3c")
        );
    }

    #[test]
    fn hex_color_rejects_invalid() {
        for s in ["notacolor", "fff", "#ffff", "#12345g", "#", "#1234567"] {
            assert!(
                Sanitizer::HexColor.apply(&RawValue::text(s)).is_err(),
                "{} should be rejected",
                s
            );
        }
    }

    #[test]
    fn text_sanitizers_reject_flags() {
        assert_eq!(
            Sanitizer::PlainText.apply(&RawValue::Bool(true)).unwrap_err(),
            SanitizeError::ExpectedText("plain text")
        );
        assert_eq!(
            Sanitizer::RichText.apply(&RawValue::Bool(false)).unwrap_err(),
            SanitizeError::ExpectedText("rich text")
        );
    }

    #[test]
    fn missing_input_is_a_caller_bug() {
        assert_eq!(
            Sanitizer::PlainText.apply(&RawValue::Missing).unwrap_err(),
            SanitizeError::MissingInput
        );
    }

    #[test]
    fn value_types() {
        assert_eq!(Sanitizer::PlainText.value_type(), ValueType::PlainText);
        assert_eq!(Sanitizer::RichText.value_type(), ValueType::RichText);
        assert_eq!(Sanitizer::Boolean.value_type(), ValueType::Boolean);
        assert_eq!(Sanitizer::HexColor.value_type(), ValueType::PlainText);
    }
}
