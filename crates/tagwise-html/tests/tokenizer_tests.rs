//! Integration tests for the tokenizer.

use tagwise_html::{HTMLTokenizer, Token, TokenKind, tokenize};

/// Helper to build a tag token
fn tag(raw: &str) -> Token {
    Token::Tag(raw.to_string())
}

/// Helper to build a text token
fn text(raw: &str) -> Token {
    Token::Text(raw.to_string())
}

#[test]
fn test_plain_text() {
    assert_eq!(tokenize("Hello"), vec![text("Hello")]);
}

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   \n\t ").is_empty());
}

#[test]
fn test_element_with_text() {
    assert_eq!(
        tokenize("<div>hi</div>"),
        vec![tag("<div>"), text("hi"), tag("</div>")]
    );
}

#[test]
fn test_text_is_trimmed() {
    assert_eq!(
        tokenize("<p>  spaced out \n</p>"),
        vec![tag("<p>"), text("spaced out"), tag("</p>")]
    );
}

#[test]
fn test_whitespace_between_tags_is_dropped() {
    assert_eq!(
        tokenize("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>"),
        vec![
            tag("<ul>"),
            tag("<li>"),
            text("a"),
            tag("</li>"),
            tag("<li>"),
            text("b"),
            tag("</li>"),
            tag("</ul>"),
        ]
    );
}

#[test]
fn test_tag_keeps_attributes_verbatim() {
    assert_eq!(
        tokenize(r#"<a href="x.html" class='c'>link</a>"#),
        vec![tag(r#"<a href="x.html" class='c'>"#), text("link"), tag("</a>")]
    );
}

#[test]
fn test_doctype_and_comment_are_tag_tokens() {
    assert_eq!(
        tokenize("<!DOCTYPE html><!-- note --><p>x</p>"),
        vec![
            tag("<!DOCTYPE html>"),
            tag("<!-- note -->"),
            tag("<p>"),
            text("x"),
            tag("</p>"),
        ]
    );
}

#[test]
fn test_unterminated_tag_discards_rest() {
    assert_eq!(
        tokenize("before<div class=\"x\" and more"),
        vec![text("before")]
    );
}

#[test]
fn test_gt_inside_quoted_value_ends_tag() {
    // Known limitation: quotes are not tracked.
    assert_eq!(
        tokenize(r#"<a title="x>y">z</a>"#),
        vec![tag(r#"<a title="x>"#), text(r#"y">z"#), tag("</a>")]
    );
}

#[test]
fn test_lazy_iteration() {
    let mut tokenizer = HTMLTokenizer::new("<b>bold</b> tail");
    assert_eq!(tokenizer.next(), Some(tag("<b>")));
    assert_eq!(tokenizer.next(), Some(text("bold")));
    assert_eq!(tokenizer.into_tokens(), vec![tag("</b>"), text("tail")]);
}

#[test]
fn test_exhausted_tokenizer_stays_empty() {
    let mut tokenizer = HTMLTokenizer::new("<p");
    assert_eq!(tokenizer.next(), None);
    assert_eq!(tokenizer.next(), None);
}

#[test]
fn test_tokenize_is_idempotent() {
    let markup = "<html><body><p class=a>One &amp; two</p><br/></body></html>";
    assert_eq!(tokenize(markup), tokenize(markup));
}

#[test]
fn test_non_ascii_text() {
    assert_eq!(
        tokenize("<p>héllo wörld</p>"),
        vec![tag("<p>"), text("héllo wörld"), tag("</p>")]
    );
}

// ========== classification ==========

#[test]
fn test_token_kinds() {
    assert_eq!(tag("<!DOCTYPE html>").kind(), TokenKind::Doctype);
    assert_eq!(tag("<!doctype html>").kind(), TokenKind::Doctype);
    assert_eq!(tag("<!-- c -->").kind(), TokenKind::Comment);
    assert_eq!(tag("<div>").kind(), TokenKind::StartTag);
    assert_eq!(tag("<br/>").kind(), TokenKind::StartTag);
    assert_eq!(tag("</div>").kind(), TokenKind::EndTag);
    assert_eq!(text("hello").kind(), TokenKind::Text);
    assert_eq!(text("   ").kind(), TokenKind::Empty);
}

#[test]
fn test_nameless_tags_keep_their_role() {
    assert_eq!(tag("< b >").kind(), TokenKind::StartTag);
    assert_eq!(tag("<>").kind(), TokenKind::StartTag);
    assert_eq!(tag("</>").kind(), TokenKind::EndTag);
    assert_eq!(tag("< b >").tag_name(), Some(""));
}

#[test]
fn test_token_tag_name() {
    assert_eq!(tag("<Div id=a>").tag_name(), Some("Div"));
    assert_eq!(tag("</span >").tag_name(), Some("span"));
    assert_eq!(tag("<!-- x -->").tag_name(), None);
    assert_eq!(text("x").tag_name(), None);
}
