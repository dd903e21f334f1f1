//! Element name tables shared by the tree builder and the error detector.
//!
//! Both tables are process-wide and read-only. Lookups are ASCII
//! case-insensitive.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Elements that never have children or a closing tag.
///
/// The doctype pseudo-tag is treated as void as well; see [`is_void_element`].
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Standard element names accepted by the invalid-tag check.
pub const KNOWN_ELEMENTS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col", "colgroup",
    "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt", "em", "embed",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "head", "header", "hr", "html", "i", "iframe", "img", "input", "ins", "kbd", "label", "legend",
    "li", "link", "main", "map", "mark", "meta", "meter", "nav", "noscript", "object", "ol",
    "optgroup", "option", "output", "p", "param", "picture", "pre", "progress", "q", "rp", "rt",
    "ruby", "s", "samp", "script", "section", "select", "small", "source", "span", "strong",
    "style", "sub", "summary", "sup", "svg", "table", "tbody", "td", "template", "textarea",
    "tfoot", "th", "thead", "time", "title", "tr", "track", "u", "ul", "var", "video", "wbr",
];

static VOID_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| VOID_ELEMENTS.iter().copied().collect());

static KNOWN_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| KNOWN_ELEMENTS.iter().copied().collect());

/// Returns true if `name` is a void element or the doctype pseudo-tag.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower == "!doctype" || VOID_SET.contains(lower.as_str())
}

/// Returns true if `name` is in the standard element whitelist.
#[must_use]
pub fn is_known_element(name: &str) -> bool {
    KNOWN_SET.contains(name.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_lookup_ignores_case() {
        assert!(is_void_element("br"));
        assert!(is_void_element("IMG"));
        assert!(is_void_element("!DOCTYPE"));
        assert!(!is_void_element("div"));
    }

    #[test]
    fn test_every_void_element_is_known() {
        for name in VOID_ELEMENTS {
            assert!(is_known_element(name), "{name} missing from whitelist");
        }
    }

    #[test]
    fn test_known_lookup() {
        assert!(is_known_element("DIV"));
        assert!(is_known_element("h6"));
        assert!(!is_known_element("blink"));
        assert!(!is_known_element(""));
    }

    #[test]
    fn test_whitelist_has_no_duplicates() {
        assert_eq!(KNOWN_SET.len(), KNOWN_ELEMENTS.len());
    }
}
