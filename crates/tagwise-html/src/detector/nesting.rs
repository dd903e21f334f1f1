//! Parent/child nesting rules for the incorrect-nesting check.
//!
//! The table lists, per parent tag, the child tags it must not contain.
//! An empty table accepts every pair, which is the default.
//!
//! JSON form:
//! ```json
//! { "forbidden": { "p": ["div", "p"], "a": ["a"] } }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to load a nesting-rule table.
#[derive(Debug, Error)]
pub enum RulesError {
    /// The rules file could not be read.
    #[error("failed to read nesting rules from {}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The rules file is not valid JSON for this table.
    #[error("invalid nesting rules: {0}")]
    Json(#[from] serde_json::Error),
}

/// Forbidden parent/child tag pairs. Names are stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestingRules {
    #[serde(default)]
    forbidden: BTreeMap<String, BTreeSet<String>>,
}

impl NestingRules {
    /// An empty table that accepts every pair.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forbid `child` directly inside `parent`.
    #[must_use]
    pub fn forbid(mut self, parent: &str, child: &str) -> Self {
        let _ = self
            .forbidden
            .entry(parent.to_ascii_lowercase())
            .or_default()
            .insert(child.to_ascii_lowercase());
        self
    }

    /// Returns true when `child` may appear inside `parent`.
    #[must_use]
    pub fn is_valid_nesting(&self, parent: &str, child: &str) -> bool {
        self.forbidden
            .get(&parent.to_ascii_lowercase())
            .is_none_or(|children| !children.contains(&child.to_ascii_lowercase()))
    }

    /// Returns true when no pair is forbidden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forbidden.values().all(BTreeSet::is_empty)
    }

    /// Parse a table from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Json`] if `json` does not describe a table.
    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        let parsed: Self = serde_json::from_str(json)?;
        Ok(parsed.normalized())
    }

    /// Read a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Io`] if the file cannot be read and
    /// [`RulesError::Json`] if its contents are not a table.
    pub fn from_json_file(path: &Path) -> Result<Self, RulesError> {
        let json = fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Rebuild the table with lowercased names.
    fn normalized(self) -> Self {
        self.forbidden
            .into_iter()
            .flat_map(|(parent, children)| {
                children
                    .into_iter()
                    .map(move |child| (parent.clone(), child))
            })
            .fold(Self::new(), |rules, (parent, child)| rules.forbid(&parent, &child))
    }
}
