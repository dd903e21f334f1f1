use strum_macros::{Display, EnumString};

use tagwise_dom::{DomTree, ElementData, NodeId, NodeType};

use super::error::ParseError;
use crate::elements::is_void_element;
use crate::tokenizer::{Token, TokenKind, extract_tag_name, parse_attributes};

/// How a closing tag is matched against the stack of open elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ReconcilePolicy {
    /// Search the whole stack, innermost first. On a match, close it and
    /// every element opened after it. Fail only when nothing matches.
    #[default]
    Lenient,
    /// The closing tag must name the innermost open element.
    Strict,
}

/// A problem the parser recovered from.
///
/// Only [`HTMLParser::run_with_issues`] produces these: skipped closers,
/// elements left open, and elements auto-closed by lenient reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human-readable description.
    pub message: String,
    /// Index into the token stream where this issue was encountered.
    /// Equal to the token count for issues found at end of input.
    pub token_index: usize,
    /// True for problems that would have failed a normal parse; false for
    /// auto-closed elements, which a lenient parse accepts.
    pub is_error: bool,
}

/// Builds a tree from a token stream.
///
/// The parser keeps a stack of open elements seeded with the synthetic root.
/// The innermost open element is the insertion point for new nodes. Void
/// elements are inserted but never pushed.
pub struct HTMLParser {
    /// Closing-tag reconciliation policy.
    policy: ReconcilePolicy,

    /// Stores `NodeId`s into the arena. `NodeId::ROOT` is always at the
    /// bottom and is never popped.
    stack_of_open_elements: Vec<NodeId>,

    /// `NodeId::ROOT` (index 0) is the synthetic root node.
    tree: DomTree,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Current position in token stream.
    token_index: usize,

    /// When set, failures and auto-closes are recorded as issues; a plain
    /// `run` records nothing.
    recovering: bool,

    /// Issues encountered by a recovering parse.
    issues: Vec<ParseIssue>,
}

impl HTMLParser {
    /// Create a new parser from a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        // DomTree::new() creates the root node at NodeId::ROOT
        Self {
            policy: ReconcilePolicy::default(),
            stack_of_open_elements: vec![NodeId::ROOT],
            tree: DomTree::new(),
            tokens,
            token_index: 0,
            recovering: false,
            issues: Vec::new(),
        }
    }

    /// Use the given closing-tag reconciliation policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shorthand for `with_policy(ReconcilePolicy::Strict)`.
    #[must_use]
    pub const fn with_strict_mode(self) -> Self {
        self.with_policy(ReconcilePolicy::Strict)
    }

    /// Run the parser and return the tree.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for a closing tag that cannot be reconciled
    /// under the active policy, or for elements still open at end of input.
    pub fn run(mut self) -> Result<DomTree, ParseError> {
        self.process_all()?;
        self.finish()?;
        Ok(self.tree)
    }

    /// Run the parser without failing, returning the tree and the issues
    /// that were recovered from.
    ///
    /// Always reconciles leniently. A closing tag with no match anywhere in
    /// the stack is recorded and skipped; elements still open at end of input
    /// are recorded and stay in the tree. Nothing is written to stderr; the
    /// caller owns the issues.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        self.recovering = true;
        self.policy = ReconcilePolicy::Lenient;

        while self.token_index < self.tokens.len() {
            let token = self.tokens[self.token_index].clone();
            if let Err(err) = self.process_token(&token) {
                self.record_issue(err.to_string(), true);
            }
            self.token_index += 1;
        }
        if let Err(err) = self.finish() {
            self.record_issue(err.to_string(), true);
        }

        let issues = std::mem::take(&mut self.issues);
        (self.tree, issues)
    }

    /// Process every remaining token, stopping at the first failure.
    fn process_all(&mut self) -> Result<(), ParseError> {
        while self.token_index < self.tokens.len() {
            let token = self.tokens[self.token_index].clone();
            self.process_token(&token)?;
            self.token_index += 1;
        }
        Ok(())
    }

    fn record_issue(&mut self, message: String, is_error: bool) {
        self.issues.push(ParseIssue {
            message,
            token_index: self.token_index,
            is_error,
        });
    }

    fn process_token(&mut self, token: &Token) -> Result<(), ParseError> {
        let raw = token.as_str().trim();
        match token.kind() {
            TokenKind::Empty => {}
            TokenKind::Doctype => {
                let _ = self.insert_node(NodeType::Doctype);
            }
            TokenKind::Comment => {
                let _ = self.insert_node(NodeType::Comment(comment_data(raw)));
            }
            TokenKind::StartTag => self.insert_element(raw),
            TokenKind::EndTag => self.close_element(extract_tag_name(raw))?,
            TokenKind::Text => {
                let _ = self.insert_node(NodeType::Text(raw.to_string()));
            }
        }
        Ok(())
    }

    /// The innermost open element; new nodes are appended here.
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    /// Allocate a node and append it to the current node.
    fn insert_node(&mut self, node_type: NodeType) -> NodeId {
        let parent = self.current_node();
        let id = self.tree.alloc(node_type);
        self.tree.append_child(parent, id);
        id
    }

    /// Insert an element for a start tag. Non-void elements are pushed and
    /// become the current node.
    fn insert_element(&mut self, raw: &str) {
        let name = extract_tag_name(raw);
        let mut data = ElementData::new(name);
        for attr in parse_attributes(raw) {
            // Last assignment wins for repeated names.
            let _ = data.attrs.insert(attr.name, attr.value);
        }

        let element_id = self.insert_node(NodeType::Element(data));
        if !is_void_element(name) {
            self.stack_of_open_elements.push(element_id);
        }
    }

    fn get_tag_name(&self, id: NodeId) -> &str {
        self.tree.tag_name(id).unwrap_or_default()
    }

    /// Reconcile a closing tag against the stack of open elements.
    fn close_element(&mut self, name: &str) -> Result<(), ParseError> {
        match self.policy {
            ReconcilePolicy::Strict => self.close_strict(name),
            ReconcilePolicy::Lenient => self.close_lenient(name),
        }
    }

    fn close_strict(&mut self, name: &str) -> Result<(), ParseError> {
        let current = self.current_node();
        if current == NodeId::ROOT {
            return Err(ParseError::UnmatchedClosingTag(name.to_string()));
        }

        let expected = self.get_tag_name(current);
        if !expected.eq_ignore_ascii_case(name) {
            return Err(ParseError::MismatchedClosingTag {
                expected: expected.to_string(),
                found: name.to_string(),
            });
        }

        let _ = self.stack_of_open_elements.pop();
        Ok(())
    }

    fn close_lenient(&mut self, name: &str) -> Result<(), ParseError> {
        // Index 0 is the synthetic root; a `</root>` must not close it.
        let Some(index) = self.stack_of_open_elements[1..]
            .iter()
            .rposition(|&id| self.get_tag_name(id).eq_ignore_ascii_case(name))
            .map(|i| i + 1)
        else {
            return Err(ParseError::UnmatchedClosingTag(name.to_string()));
        };

        if self.recovering {
            let auto_closed: Vec<String> = self.stack_of_open_elements[index + 1..]
                .iter()
                .rev()
                .map(|&id| self.get_tag_name(id).to_string())
                .collect();
            for inner in auto_closed {
                self.record_issue(format!("auto-closed <{inner}> while closing </{name}>"), false);
            }
        }

        self.stack_of_open_elements.truncate(index);
        Ok(())
    }

    /// At end of input only the root may remain open.
    fn finish(&self) -> Result<(), ParseError> {
        if self.stack_of_open_elements.len() <= 1 {
            return Ok(());
        }
        let open = self.stack_of_open_elements[1..]
            .iter()
            .rev()
            .map(|&id| self.get_tag_name(id).to_string())
            .collect();
        Err(ParseError::UnclosedTags(open))
    }
}

/// Parse a token stream with the default (lenient) policy.
///
/// # Errors
///
/// See [`HTMLParser::run`].
pub fn parse(tokens: Vec<Token>) -> Result<DomTree, ParseError> {
    HTMLParser::new(tokens).run()
}

/// The text between `<!--` and a trailing `-->`, trimmed.
///
/// Tag tokens end at the first `>`, so `<!-- a > b -->` arrives here as
/// `<!-- a >` and yields `a`; the rest of the comment follows as text.
fn comment_data(raw: &str) -> String {
    let body = raw.strip_prefix("<!--").unwrap_or(raw);
    let body = body
        .strip_suffix("-->")
        .or_else(|| body.strip_suffix('>'))
        .unwrap_or(body);
    body.trim().to_string()
}
