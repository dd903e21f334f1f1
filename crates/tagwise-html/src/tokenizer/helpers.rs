//! Helper functions for reading tag tokens.
//!
//! - Tag name extraction (`<div class="a">` -> `div`, `</p >` -> `p`)
//! - Attribute extraction with double-quoted, single-quoted and unquoted values

use std::sync::LazyLock;

use regex::Regex;

use super::token::Attribute;

/// `name = value`, where the value is the first alternative that matched:
/// double-quoted, single-quoted, or an unquoted run of non-space characters.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\w:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|(\S+))"#).expect("valid attribute regex")
});

/// Strips the leading `<` and one `/` or `!` from a tag token.
fn strip_tag_open(tag: &str) -> &str {
    let tag = tag.trim_start();
    let tag = tag.strip_prefix('<').unwrap_or(tag);
    tag.strip_prefix(['/', '!']).unwrap_or(tag)
}

/// Extract the tag name from a tag token.
///
/// The name runs up to the first whitespace, `>` or `/`. Case is preserved.
/// Returns an empty string when the token has no name (`<>`, `< b>`).
///
/// # Example
/// ```ignore
/// extract_tag_name("<img src=\"x\"/>")  // "img"
/// extract_tag_name("</DIV>")            // "DIV"
/// ```
#[must_use]
pub fn extract_tag_name(tag: &str) -> &str {
    let body = strip_tag_open(tag);
    let end = body
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(body.len());
    &body[..end]
}

/// The part of a tag token that holds its attributes.
///
/// Starts at the whitespace following the tag name and ends before any
/// trailing `/`, `>` and whitespace. Empty when nothing follows the name.
fn attributes_region(tag: &str) -> &str {
    let body = strip_tag_open(tag);
    let rest = &body[extract_tag_name(tag).len()..];
    if !rest.starts_with(char::is_whitespace) {
        return "";
    }
    rest.trim_end_matches(|c: char| c == '>' || c == '/' || c.is_whitespace())
}

/// Parse the attributes of a tag token, in source order.
///
/// Repeated names are kept; callers decide whether the last one wins
/// (tree building) or whether the repetition is reported (error detection).
#[must_use]
pub fn parse_attributes(tag: &str) -> Vec<Attribute> {
    ATTRIBUTE
        .captures_iter(attributes_region(tag))
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            Attribute::new(caps[1].to_string(), value.to_string())
        })
        .collect()
}
