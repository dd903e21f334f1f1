//! Markup tokenizer.
//!
//! Splits raw text into tag tokens and text tokens. No positions are kept.

/// Tokenizer iterator and the `tokenize` entry point.
pub mod core;
/// Tag name and attribute extraction from tag tokens.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, tokenize};
pub use helpers::{extract_tag_name, parse_attributes};
pub use token::{Attribute, Token, TokenKind};
