//! Markup tokenizer, tree builder and error detector.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - splits raw markup into tag tokens and trimmed text tokens
//!   - No positions, no raw-text modes, no entity decoding
//!
//! - **Parser / Tree Builder** - builds an ordered tree with a stack of open
//!   elements
//!   - Void elements, doctype and comment declarations
//!   - Lenient (search the stack) or strict (innermost only) closing-tag matching
//!   - A recovering mode that never fails, used by the detector
//!
//! - **Error Detector** - ten heuristic checks for common authoring mistakes
//!
//! # Example
//! ```ignore
//! let findings = tagwise_html::detect(markup);
//! let tree = tagwise_html::parse(tagwise_html::tokenize(markup))?;
//! ```

/// Heuristic checks over raw markup.
pub mod detector;
/// Element name tables.
pub mod elements;
/// Tree construction.
pub mod parser;
/// Text, outline and JSON views of a tree.
pub mod render;
/// Markup tokenizer.
pub mod tokenizer;

pub use detector::{Check, Diagnostic, ErrorDetector, NestingRules, RulesError, detect};
pub use parser::{HTMLParser, ParseError, ParseIssue, ReconcilePolicy, parse};
pub use render::{
    TreeSnapshot, node_label, outline, print_tree, tag_order, tree_to_string, write_tree,
};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenKind, tokenize};
