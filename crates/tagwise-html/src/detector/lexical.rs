//! Checks that scan the raw markup text with their own patterns.
//!
//! None of these use the tokenizer; each re-lexes the input the way its
//! check needs.

use std::sync::LazyLock;

use regex::Regex;

use crate::elements::is_known_element;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/)?(\w+)[^>]*>").expect("valid tag regex"));

static TAG_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(\w+)").expect("valid tag-open regex"));

static UNQUOTED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\w:-]+)=([^\s"'>]+)"#).expect("valid unquoted-value regex")
});

static MISSING_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\w:-]+)=\s*(?:""|''|/?>|$)"#).expect("valid missing-value regex")
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:\w+|#[0-9]+|#[xX][0-9a-fA-F]+);").expect("valid entity regex")
});

static DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!DOCTYPE\s+html").expect("valid doctype regex"));

/// Match every `<tag>` and `</tag>` against a stack of open names.
///
/// A closer that does not name the top of the stack (or arrives with an
/// empty stack) is reported immediately and leaves the stack alone. Names
/// still open at the end are reported innermost first. Void elements are not
/// special-cased here.
pub(crate) fn unclosed_tags(markup: &str) -> Vec<String> {
    let mut errors = Vec::new();
    let mut tags: Vec<String> = Vec::new();

    for caps in TAG.captures_iter(markup) {
        let tag = caps[2].to_lowercase();
        let is_closing = caps.get(1).is_some();

        if !is_closing {
            tags.push(tag);
        } else if tags.last() == Some(&tag) {
            let _ = tags.pop();
        } else {
            errors.push(format!("Mismatched or unclosed tag: <{tag}>"));
        }
    }

    while let Some(tag) = tags.pop() {
        errors.push(format!("Unclosed tag: <{tag}>"));
    }
    errors
}

/// `name=value` where the value is not quoted.
pub(crate) fn unquoted_attribute_values(markup: &str) -> Vec<String> {
    UNQUOTED_VALUE
        .captures_iter(markup)
        .map(|caps| format!("Unquoted attribute value: {}={}", &caps[1], &caps[2]))
        .collect()
}

/// `name=` followed by nothing, an empty quoted string, or the end of the tag.
pub(crate) fn missing_attribute_values(markup: &str) -> Vec<String> {
    MISSING_VALUE
        .captures_iter(markup)
        .map(|caps| format!("Missing attribute value for: {}", &caps[1]))
        .collect()
}

/// Every `<name` whose name is not a standard element, once per occurrence.
pub(crate) fn invalid_tag_names(markup: &str) -> Vec<String> {
    TAG_OPEN
        .captures_iter(markup)
        .map(|caps| caps[1].to_lowercase())
        .filter(|tag| !is_known_element(tag))
        .map(|tag| format!("Invalid HTML tag: <{tag}>"))
        .collect()
}

/// `&`, `<` and `>` that are not part of an entity reference, reported at
/// most once per character.
///
/// `&` is fine when it starts an entity reference (`&amp;`, `&#38;`,
/// `&#x26;`). `<` and `>` never belong to one, so any occurrence counts,
/// including those of ordinary tags.
pub(crate) fn unescaped_special_characters(markup: &str) -> Vec<String> {
    let bare_amp = markup
        .match_indices('&')
        .any(|(i, _)| !ENTITY.is_match(&markup[i..]));

    [
        ('&', bare_amp),
        ('<', markup.contains('<')),
        ('>', markup.contains('>')),
    ]
    .into_iter()
    .filter(|&(_, found)| found)
    .map(|(c, _)| format!("Unescaped special character: {c}"))
    .collect()
}

/// Returns true if a `<!DOCTYPE html` declaration appears anywhere.
pub(crate) fn has_doctype(markup: &str) -> bool {
    DOCTYPE.is_match(markup)
}

/// Returns true if some `<!--` has no `-->` after it.
///
/// Only the last opener matters: if it is closed, every earlier one has a
/// `-->` after it too.
pub(crate) fn has_unclosed_comment(markup: &str) -> bool {
    markup
        .rfind("<!--")
        .is_some_and(|start| !markup[start + 4..].contains("-->"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclosed_tags_balanced() {
        assert!(unclosed_tags("<div><p>x</p></div>").is_empty());
    }

    #[test]
    fn test_unclosed_tags_reports_leftovers_innermost_first() {
        assert_eq!(
            unclosed_tags("<html><body>"),
            vec!["Unclosed tag: <body>", "Unclosed tag: <html>"]
        );
    }

    #[test]
    fn test_unclosed_tags_mismatch_keeps_stack() {
        assert_eq!(
            unclosed_tags("<div><span></div>"),
            vec![
                "Mismatched or unclosed tag: <div>",
                "Unclosed tag: <span>",
                "Unclosed tag: <div>",
            ]
        );
    }

    #[test]
    fn test_unclosed_tags_lowercases() {
        assert!(unclosed_tags("<DIV></div>").is_empty());
    }

    #[test]
    fn test_unclosed_tags_stray_closer() {
        assert_eq!(
            unclosed_tags("</p>"),
            vec!["Mismatched or unclosed tag: <p>"]
        );
    }

    #[test]
    fn test_unclosed_tags_counts_void_elements() {
        assert_eq!(unclosed_tags("<br>"), vec!["Unclosed tag: <br>"]);
    }

    #[test]
    fn test_unquoted_values() {
        assert_eq!(
            unquoted_attribute_values(r#"<a href=page.html title="x">"#),
            vec!["Unquoted attribute value: href=page.html"]
        );
        assert!(unquoted_attribute_values(r#"<a href="x">"#).is_empty());
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(
            missing_attribute_values(r#"<input value= ><img alt="">"#),
            vec![
                "Missing attribute value for: value",
                "Missing attribute value for: alt",
            ]
        );
        assert_eq!(
            missing_attribute_values("<input value=/>"),
            vec!["Missing attribute value for: value"]
        );
        assert_eq!(
            missing_attribute_values("<input value="),
            vec!["Missing attribute value for: value"]
        );
        assert!(missing_attribute_values(r#"<a href="x" rel=next>"#).is_empty());
    }

    #[test]
    fn test_invalid_tag_names() {
        assert_eq!(
            invalid_tag_names("<blink>x</blink><Foo/><div>"),
            vec!["Invalid HTML tag: <blink>", "Invalid HTML tag: <foo>"]
        );
        assert!(invalid_tag_names("<!DOCTYPE html><p></p>").is_empty());
    }

    #[test]
    fn test_unescaped_ampersand() {
        assert_eq!(
            unescaped_special_characters("AT&T"),
            vec!["Unescaped special character: &"]
        );
        assert!(unescaped_special_characters("&amp; &#38; &#x26;").is_empty());
    }

    #[test]
    fn test_unescaped_angle_brackets_in_tags() {
        assert_eq!(
            unescaped_special_characters("<p>&amp;</p>"),
            vec![
                "Unescaped special character: <",
                "Unescaped special character: >",
            ]
        );
        assert_eq!(
            unescaped_special_characters("a > b"),
            vec!["Unescaped special character: >"]
        );
    }

    #[test]
    fn test_unescaped_once_per_character() {
        assert_eq!(
            unescaped_special_characters("<p>a & b & c</p><br>"),
            vec![
                "Unescaped special character: &",
                "Unescaped special character: <",
                "Unescaped special character: >",
            ]
        );
    }

    #[test]
    fn test_unescaped_comments_not_exempt() {
        assert_eq!(
            unescaped_special_characters("<!-- a & b -->"),
            vec![
                "Unescaped special character: &",
                "Unescaped special character: <",
                "Unescaped special character: >",
            ]
        );
    }

    #[test]
    fn test_unescaped_plain_text() {
        assert!(unescaped_special_characters("plain text").is_empty());
    }

    #[test]
    fn test_doctype_detection() {
        assert!(has_doctype("<!DOCTYPE html><html></html>"));
        assert!(has_doctype("\n<!doctype   HTML>"));
        assert!(!has_doctype("<!DOCTYPE>"));
        assert!(!has_doctype("<html></html>"));
    }

    #[test]
    fn test_unclosed_comment() {
        assert!(has_unclosed_comment("<p>x</p><!-- todo"));
        assert!(has_unclosed_comment("<!-- a --><!-- b"));
        assert!(!has_unclosed_comment("<!-- a --><p>x</p>"));
        assert!(!has_unclosed_comment("<p>x</p>"));
    }
}
