use std::iter::FusedIterator;

use super::token::Token;

/// Splits markup into tag and text tokens.
///
/// The tokenizer is a single cursor over borrowed input and yields tokens
/// lazily. It keeps no state between documents; tokenizing the same input
/// twice yields the same sequence.
///
/// - `<` starts a tag token that runs through the next `>`. If there is no
///   `>`, the rest of the input is dropped. A `>` inside a quoted attribute
///   value still ends the tag.
/// - Anything else is text up to the next `<`. Text is trimmed, and
///   whitespace-only text produces no token.
#[derive(Debug, Clone)]
pub struct HTMLTokenizer<'a> {
    input: &'a str,
    current_pos: usize,
}

impl<'a> HTMLTokenizer<'a> {
    /// Create a tokenizer over `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            current_pos: 0,
        }
    }

    /// Consume the tokenizer and collect the remaining tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.collect()
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.current_pos..]
    }
}

impl Iterator for HTMLTokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let rest = self.remaining();
            if rest.is_empty() {
                return None;
            }

            if rest.starts_with('<') {
                let Some(end) = rest.find('>') else {
                    // Unterminated tag: the remainder is discarded.
                    self.current_pos = self.input.len();
                    return None;
                };
                self.current_pos += end + 1;
                return Some(Token::Tag(rest[..=end].to_string()));
            }

            let end = rest.find('<').unwrap_or(rest.len());
            self.current_pos += end;
            let text = rest[..end].trim();
            if !text.is_empty() {
                return Some(Token::Text(text.to_string()));
            }
        }
    }
}

impl FusedIterator for HTMLTokenizer<'_> {}

/// Tokenize a whole document.
///
/// # Example
/// ```ignore
/// tokenize("<p>hi</p>")  // [Tag("<p>"), Text("hi"), Tag("</p>")]
/// ```
#[must_use]
pub fn tokenize(markup: &str) -> Vec<Token> {
    HTMLTokenizer::new(markup).into_tokens()
}
