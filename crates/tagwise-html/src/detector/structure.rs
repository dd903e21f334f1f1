//! Checks that look at a recovering parse of the document.

use std::collections::HashMap;

use tagwise_dom::{DomTree, NodeId};

use super::nesting::NestingRules;
use crate::parser::HTMLParser;
use crate::tokenizer::{Token, TokenKind, parse_attributes, tokenize};

/// A document as seen by the structural checks: its tokens and the tree a
/// recovering parse builds from them.
pub(crate) struct LenientDocument {
    pub(crate) tokens: Vec<Token>,
    pub(crate) tree: DomTree,
}

impl LenientDocument {
    pub(crate) fn parse(markup: &str) -> Self {
        let tokens = tokenize(markup);
        let (tree, _issues) = HTMLParser::new(tokens.clone()).run_with_issues();
        Self { tokens, tree }
    }
}

fn lowercase_tag(tree: &DomTree, id: NodeId) -> Option<String> {
    tree.as_element(id).map(|e| e.tag_name.to_lowercase())
}

/// Adjacent sibling elements with different names, where the first one's
/// name also differs from their parent's.
///
/// Intentionally loose: it flags `<head></head><body></body>` too.
pub(crate) fn mismatched_siblings(tree: &DomTree) -> Vec<String> {
    let mut errors = Vec::new();
    for id in tree.descendants(tree.root()) {
        let Some(current) = lowercase_tag(tree, id) else {
            continue;
        };
        let Some(next) = tree.next_sibling(id).and_then(|n| lowercase_tag(tree, n)) else {
            continue;
        };
        let parent = tree
            .parent(id)
            .and_then(|p| tree.tag_name(p))
            .map(str::to_lowercase)
            .unwrap_or_default();

        if current != next && current != parent {
            errors.push(format!("Potential mismatched tags: <{current}> and <{next}>"));
        }
    }
    errors
}

/// Every element checked against its nearest element ancestor.
pub(crate) fn incorrect_nesting(tree: &DomTree, rules: &NestingRules) -> Vec<String> {
    let mut errors = Vec::new();
    for id in tree.descendants(tree.root()) {
        let Some(child) = lowercase_tag(tree, id) else {
            continue;
        };
        let Some(parent) = tree.ancestors(id).find_map(|a| lowercase_tag(tree, a)) else {
            continue;
        };
        if !rules.is_valid_nesting(&parent, &child) {
            errors.push(format!("Incorrect nesting: <{parent}> contains <{child}>"));
        }
    }
    errors
}

/// Attribute names given more than once on the same element.
///
/// Every start tag becomes exactly one element of the recovering parse, so
/// the start tags are read directly; the tree only keeps the last value.
/// Names compare case-insensitively and each repeated name is reported once.
pub(crate) fn duplicate_attributes(tokens: &[Token]) -> Vec<String> {
    let mut errors = Vec::new();
    for token in tokens.iter().filter(|t| t.kind() == TokenKind::StartTag) {
        let tag = token.tag_name().unwrap_or_default().to_lowercase();

        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for attr in parse_attributes(token.as_str()) {
            let name = attr.name.to_lowercase();
            if let Some(&slot) = index.get(&name) {
                counts[slot].1 += 1;
            } else {
                let _ = index.insert(name.clone(), counts.len());
                counts.push((name, 1));
            }
        }

        for (name, _) in counts.into_iter().filter(|&(_, n)| n > 1) {
            errors.push(format!("Duplicate attribute in <{tag}>: {name}"));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(markup: &str) -> DomTree {
        LenientDocument::parse(markup).tree
    }

    #[test]
    fn test_siblings_same_name_not_flagged() {
        assert!(mismatched_siblings(&tree("<ul><li>a</li><li>b</li></ul>")).is_empty());
    }

    #[test]
    fn test_siblings_different_names_flagged() {
        assert_eq!(
            mismatched_siblings(&tree("<div><p>a</p><span>b</span></div>")),
            vec!["Potential mismatched tags: <p> and <span>"]
        );
    }

    #[test]
    fn test_siblings_text_between_not_flagged() {
        assert!(mismatched_siblings(&tree("<div><p>a</p>text<span>b</span></div>")).is_empty());
    }

    #[test]
    fn test_siblings_current_named_like_parent_not_flagged() {
        assert!(mismatched_siblings(&tree("<div><div></div><p></p></div>")).is_empty());
    }

    #[test]
    fn test_nesting_default_rules_accept() {
        let t = tree("<p><div></div></p>");
        assert!(incorrect_nesting(&t, &NestingRules::new()).is_empty());
    }

    #[test]
    fn test_nesting_with_rule() {
        let t = tree("<p><b>x<div></div></b></p><div></div>");
        let rules = NestingRules::new().forbid("b", "div").forbid("root", "div");
        assert_eq!(
            incorrect_nesting(&t, &rules),
            vec!["Incorrect nesting: <b> contains <div>"]
        );
    }

    #[test]
    fn test_duplicate_attributes_once_per_name() {
        let doc = LenientDocument::parse(r#"<div class="a" CLASS="b" class=c id=x></div>"#);
        assert_eq!(
            duplicate_attributes(&doc.tokens),
            vec!["Duplicate attribute in <div>: class"]
        );
    }

    #[test]
    fn test_duplicate_attributes_per_element() {
        let doc = LenientDocument::parse(r#"<p id="a"></p><p id="b"></p>"#);
        assert!(duplicate_attributes(&doc.tokens).is_empty());
    }
}
