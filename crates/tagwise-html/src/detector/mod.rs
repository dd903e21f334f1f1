//! Heuristic error detection for hand-written markup.
//!
//! The detector runs ten independent checks in a fixed order and
//! concatenates their findings. Checks overlap, so one mistake often shows
//! up several times; findings are not deduplicated across checks.
//!
//! Detection never fails. Whether findings should stop a later parse is up
//! to the caller.

mod lexical;
/// Parent/child rule table for the incorrect-nesting check.
pub mod nesting;
mod structure;

use core::fmt;
use std::collections::HashSet;

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

pub use nesting::{NestingRules, RulesError};
use structure::LenientDocument;

/// One of the detector's checks, in the order they run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Check {
    /// Closing tags that do not match the innermost open tag, and tags left open.
    UnclosedTags,
    /// Adjacent sibling elements with different names.
    MismatchedSiblings,
    /// `name=value` without quotes.
    UnquotedAttributes,
    /// `name=` with no value.
    MissingAttributeValues,
    /// Parent/child pairs forbidden by the nesting rules.
    IncorrectNesting,
    /// Tag names outside the standard element list.
    InvalidTagNames,
    /// The same attribute twice on one element.
    DuplicateAttributes,
    /// `&` outside an entity reference, or any `<` or `>`.
    UnescapedCharacters,
    /// No `<!DOCTYPE html>` declaration.
    MissingDoctype,
    /// A comment that never ends.
    UnclosedComment,
}

impl Check {
    /// Returns true for checks that need the recovering parse.
    #[must_use]
    pub const fn needs_parse(self) -> bool {
        matches!(
            self,
            Self::MismatchedSiblings | Self::IncorrectNesting | Self::DuplicateAttributes
        )
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The check that produced the finding.
    pub check: Check,
    /// Human-readable description, e.g. `Unclosed tag: <div>`.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Runs the checks over a document.
///
/// # Example
/// ```ignore
/// let detector = ErrorDetector::new()
///     .without_check(Check::MissingDoctype)
///     .with_nesting_rules(NestingRules::new().forbid("p", "div"));
/// let findings = detector.detect("<p><div></div></p>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorDetector {
    disabled: HashSet<Check>,
    nesting_rules: NestingRules,
}

impl ErrorDetector {
    /// A detector running every check with an empty nesting-rule table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `rules` for the incorrect-nesting check.
    #[must_use]
    pub fn with_nesting_rules(mut self, rules: NestingRules) -> Self {
        self.nesting_rules = rules;
        self
    }

    /// Skip `check`.
    #[must_use]
    pub fn without_check(mut self, check: Check) -> Self {
        let _ = self.disabled.insert(check);
        self
    }

    /// Returns true if `check` will run.
    #[must_use]
    pub fn is_enabled(&self, check: Check) -> bool {
        !self.disabled.contains(&check)
    }

    /// Run the enabled checks in order and return every finding.
    #[must_use]
    pub fn diagnose(&self, markup: &str) -> Vec<Diagnostic> {
        let enabled: Vec<Check> = Check::iter().filter(|&c| self.is_enabled(c)).collect();
        let document = enabled
            .iter()
            .any(|c| c.needs_parse())
            .then(|| LenientDocument::parse(markup));

        let mut diagnostics = Vec::new();
        for check in enabled {
            let messages = match (check, &document) {
                (Check::UnclosedTags, _) => lexical::unclosed_tags(markup),
                (Check::MismatchedSiblings, Some(doc)) => structure::mismatched_siblings(&doc.tree),
                (Check::UnquotedAttributes, _) => lexical::unquoted_attribute_values(markup),
                (Check::MissingAttributeValues, _) => lexical::missing_attribute_values(markup),
                (Check::IncorrectNesting, Some(doc)) => {
                    structure::incorrect_nesting(&doc.tree, &self.nesting_rules)
                }
                (Check::InvalidTagNames, _) => lexical::invalid_tag_names(markup),
                (Check::DuplicateAttributes, Some(doc)) => {
                    structure::duplicate_attributes(&doc.tokens)
                }
                (Check::UnescapedCharacters, _) => lexical::unescaped_special_characters(markup),
                (Check::MissingDoctype, _) if !lexical::has_doctype(markup) => {
                    vec!["Missing DOCTYPE declaration".to_string()]
                }
                (Check::UnclosedComment, _) if lexical::has_unclosed_comment(markup) => {
                    vec!["Unclosed HTML comment detected".to_string()]
                }
                _ => Vec::new(),
            };
            diagnostics.extend(
                messages
                    .into_iter()
                    .map(|message| Diagnostic { check, message }),
            );
        }
        diagnostics
    }

    /// Run the enabled checks and return the finding messages.
    #[must_use]
    pub fn detect(&self, markup: &str) -> Vec<String> {
        self.diagnose(markup)
            .into_iter()
            .map(|d| d.message)
            .collect()
    }
}

/// Run every check with the default configuration.
///
/// An empty result means no findings.
#[must_use]
pub fn detect(markup: &str) -> Vec<String> {
    ErrorDetector::new().detect(markup)
}
