//! Tree construction from tokens.

/// Tree builder and closing-tag reconciliation.
pub mod core;
/// Structural parse failures.
pub mod error;

pub use self::core::{HTMLParser, ParseIssue, ReconcilePolicy, parse};
pub use error::ParseError;
