use core::fmt;

use strum_macros::Display;

use super::helpers::extract_tag_name;

/// An attribute parsed out of a tag token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written.
    pub name: String,
    /// Attribute value with surrounding quotes removed.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// A raw lexical unit produced by the tokenizer.
///
/// Tokens keep their source text. Classification into doctype, comment,
/// start tag, end tag or text happens in [`Token::kind`], which is what the
/// tree builder dispatches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Raw text from `<` through the next `>`, inclusive.
    Tag(String),
    /// Trimmed, non-empty text between tags.
    Text(String),
}

/// The role a token plays in tree construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenKind {
    /// Empty or whitespace-only; skipped.
    Empty,
    /// Starts with `<!DOCTYPE` (any case).
    Doctype,
    /// Starts with `<!--`.
    Comment,
    /// Starts with `<` but not `</`. The name may be empty, as in `< b >`.
    StartTag,
    /// Starts with `</`.
    EndTag,
    /// Anything that does not start with `<`.
    Text,
}

impl Token {
    /// The source text of the token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tag(raw) | Self::Text(raw) => raw,
        }
    }

    /// Returns true for tag tokens.
    #[must_use]
    pub const fn is_tag(&self) -> bool {
        matches!(self, Self::Tag(_))
    }

    /// Classify the token by its text.
    ///
    /// Classification looks only at the text, so a hand-built
    /// `Token::Text("<p>")` is still a start tag.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        let raw = self.as_str().trim();
        if raw.is_empty() {
            return TokenKind::Empty;
        }
        if starts_with_ignore_ascii_case(raw, "<!DOCTYPE") {
            return TokenKind::Doctype;
        }
        if raw.starts_with("<!--") {
            return TokenKind::Comment;
        }
        if !raw.starts_with('<') {
            return TokenKind::Text;
        }
        if raw.starts_with("</") {
            TokenKind::EndTag
        } else {
            TokenKind::StartTag
        }
    }

    /// The tag name for start and end tags, `None` otherwise. Nameless tags
    /// such as `<>` give `Some("")`.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self.kind() {
            TokenKind::StartTag | TokenKind::EndTag => Some(extract_tag_name(self.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(raw) => write!(f, "Tag({raw})"),
            Self::Text(raw) => write!(f, "Text({raw:?})"),
        }
    }
}

fn starts_with_ignore_ascii_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
