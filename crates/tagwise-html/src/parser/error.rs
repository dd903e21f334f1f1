use thiserror::Error;

/// A structural failure that stops tree construction.
///
/// The parser returns no partial tree alongside these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A closing tag with no matching open element.
    #[error("unmatched closing tag: </{0}>")]
    UnmatchedClosingTag(String),

    /// A closing tag that disagrees with the innermost open element
    /// (strict reconciliation only).
    #[error("mismatched closing tag: </{found}> (expected </{expected}>)")]
    MismatchedClosingTag {
        /// Name of the innermost open element.
        expected: String,
        /// Name in the closing tag.
        found: String,
    },

    /// Elements still open at end of input, innermost first.
    #[error("unclosed tags found: {}", .0.join(", "))]
    UnclosedTags(Vec<String>),
}
