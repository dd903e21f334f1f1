//! Views over a parsed tree: indented text, tree-view labels, a
//! breadth-first outline, and a serializable snapshot for JSON output.

use std::collections::{BTreeMap, VecDeque};
use std::fmt::{self, Write};

use serde::Serialize;
use tagwise_dom::{DomTree, NodeId, NodeType};

/// Label for a node in a tree view.
///
/// Text nodes show their content. Elements show their name, followed by
/// their attributes sorted by name: `a [href="x", rel="next"]`.
#[must_use]
pub fn node_label(tree: &DomTree, id: NodeId) -> String {
    let Some(node) = tree.get(id) else {
        return String::new();
    };
    match &node.node_type {
        NodeType::Text(data) => data.clone(),
        NodeType::Element(data) if !data.attrs.is_empty() => {
            let attrs: BTreeMap<&String, &String> = data.attrs.iter().collect();
            let attrs: Vec<String> = attrs
                .into_iter()
                .map(|(k, v)| format!("{k}=\"{v}\""))
                .collect();
            format!("{} [{}]", data.tag_name, attrs.join(", "))
        }
        other => other.tag_name().to_string(),
    }
}

/// Write the subtree at `id` as indented text, two spaces per level.
///
/// # Errors
///
/// Propagates errors from `out`.
pub fn write_tree(out: &mut impl Write, tree: &DomTree, id: NodeId, indent: usize) -> fmt::Result {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.node_type {
            NodeType::Root => writeln!(out, "{prefix}root")?,
            NodeType::Doctype => writeln!(out, "{prefix}<!DOCTYPE>")?,
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    writeln!(out, "{prefix}<{}>", data.tag_name)?;
                } else {
                    let attrs: BTreeMap<&String, &String> = data.attrs.iter().collect();
                    let attrs: Vec<String> = attrs
                        .into_iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.clone()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "))?;
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n");
                writeln!(out, "{prefix}\"{display}\"")?;
            }
            NodeType::Comment(data) => writeln!(out, "{prefix}<!-- {data} -->")?,
        }
        for &child_id in tree.children(id) {
            write_tree(out, tree, child_id, indent + 1)?;
        }
    }
    Ok(())
}

/// The whole tree as indented text.
#[must_use]
pub fn tree_to_string(tree: &DomTree) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_tree(&mut out, tree, tree.root(), 0);
    out
}

/// Print a tree for debugging.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let mut out = String::new();
    let _ = write_tree(&mut out, tree, id, indent);
    print!("{out}");
}

/// Breadth-first listing of elements and text, one per line.
///
/// Children of the root are at depth 0; each level adds two spaces.
/// Elements print as `Element: name`, text as `Text: content`. Doctype and
/// comment nodes are left out.
#[must_use]
pub fn outline(tree: &DomTree) -> String {
    let mut out = String::new();
    let mut queue: VecDeque<(NodeId, usize)> = tree
        .children(tree.root())
        .iter()
        .map(|&id| (id, 0))
        .collect();

    while let Some((id, depth)) = queue.pop_front() {
        let indent = "  ".repeat(depth);
        if let Some(data) = tree.as_element(id) {
            let _ = writeln!(out, "{indent}Element: {}", data.tag_name);
        } else if let Some(text) = tree.as_text(id) {
            let _ = writeln!(out, "{indent}Text: {text}");
        }
        queue.extend(tree.children(id).iter().map(|&child| (child, depth + 1)));
    }
    out
}

/// Element tag names in document order.
#[must_use]
pub fn tag_order(tree: &DomTree) -> Vec<String> {
    tree.descendants(tree.root())
        .filter_map(|id| tree.as_element(id).map(|e| e.tag_name.clone()))
        .collect()
}

/// Owned, serializable copy of a subtree.
///
/// Serializes with a `type` tag, e.g.
/// `{"type":"element","tagName":"p","attributes":{},"children":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeSnapshot {
    /// The synthetic root.
    Root {
        /// Top-level nodes.
        children: Vec<TreeSnapshot>,
    },
    /// A doctype declaration.
    Doctype,
    /// An element.
    Element {
        /// Tag name as written.
        #[serde(rename = "tagName")]
        tag_name: String,
        /// Attributes, sorted by name.
        attributes: BTreeMap<String, String>,
        /// Child nodes.
        children: Vec<TreeSnapshot>,
    },
    /// A text node.
    Text {
        /// Trimmed text.
        content: String,
    },
    /// A comment.
    Comment {
        /// Comment body.
        content: String,
    },
}

impl TreeSnapshot {
    /// Snapshot the subtree at `id`. Returns `None` for an unknown id.
    #[must_use]
    pub fn from_tree(tree: &DomTree, id: NodeId) -> Option<Self> {
        let node = tree.get(id)?;
        let children = || -> Vec<Self> {
            tree.children(id)
                .iter()
                .filter_map(|&child| Self::from_tree(tree, child))
                .collect()
        };
        Some(match &node.node_type {
            NodeType::Root => Self::Root {
                children: children(),
            },
            NodeType::Doctype => Self::Doctype,
            NodeType::Element(data) => Self::Element {
                tag_name: data.tag_name.clone(),
                attributes: data
                    .attrs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                children: children(),
            },
            NodeType::Text(content) => Self::Text {
                content: content.clone(),
            },
            NodeType::Comment(content) => Self::Comment {
                content: content.clone(),
            },
        })
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error, which does not happen for this type
    /// in practice.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
