//! Difference tree types.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::fieldpath::PathElement;
use crate::value::Value;

/// DiffKind is the kind of difference found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Equal,
    Added,
    Removed,
    Modified,
}

impl DiffKind {
    /// The marker used when rendering this kind.
    pub fn symbol(&self) -> &'static str {
        match self {
            DiffKind::Equal => " ",
            DiffKind::Added => "+",
            DiffKind::Removed => "-",
            DiffKind::Modified => "~",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiffKind::Equal => "equal",
            DiffKind::Added => "added",
            DiffKind::Removed => "removed",
            DiffKind::Modified => "modified",
        };
        f.write_str(name)
    }
}

/// DiffNode is one node of the difference tree.
///
/// Only differing children are kept: an Equal node never appears below
/// its parent. Leaves carry the differing values; `before` is set for
/// Removed and Modified, `after` for Added and Modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffNode {
    /// Dot/bracket address of this node; empty for the root.
    pub path: String,

    pub kind: DiffKind,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub before: Option<Value>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub after: Option<Value>,

    /// Children keyed by token; field names and indices are never mixed.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<PathElement, DiffNode>,
}

// A present `null` payload is a value, not an absent one.
fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl DiffNode {
    fn leaf(path: impl Into<String>, kind: DiffKind, before: Option<Value>, after: Option<Value>) -> Self {
        DiffNode {
            path: path.into(),
            kind,
            before,
            after,
            children: BTreeMap::new(),
        }
    }

    /// Creates a node with no difference.
    pub fn equal(path: impl Into<String>) -> Self {
        Self::leaf(path, DiffKind::Equal, None, None)
    }

    /// Creates a node for a value only present on the right-hand side.
    pub fn added(path: impl Into<String>, after: Value) -> Self {
        Self::leaf(path, DiffKind::Added, None, Some(after))
    }

    /// Creates a node for a value only present on the left-hand side.
    pub fn removed(path: impl Into<String>, before: Value) -> Self {
        Self::leaf(path, DiffKind::Removed, Some(before), None)
    }

    /// Creates a leaf for a value that changed.
    pub fn modified(path: impl Into<String>, before: Value, after: Value) -> Self {
        Self::leaf(path, DiffKind::Modified, Some(before), Some(after))
    }

    /// Creates an interior node from its already-built children.
    ///
    /// Equal children are dropped; the node is Modified if anything is left.
    pub fn branch(path: impl Into<String>, children: BTreeMap<PathElement, DiffNode>) -> Self {
        let children: BTreeMap<_, _> = children
            .into_iter()
            .filter(|(_, child)| !child.is_equal())
            .collect();
        let kind = if children.is_empty() {
            DiffKind::Equal
        } else {
            DiffKind::Modified
        };

        DiffNode {
            path: path.into(),
            kind,
            before: None,
            after: None,
            children,
        }
    }

    pub fn is_equal(&self) -> bool {
        self.kind == DiffKind::Equal
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns true if every child is addressed by list index.
    pub fn is_list(&self) -> bool {
        !self.children.is_empty() && self.children.keys().all(PathElement::is_index)
    }

    /// Returns the child for a field name.
    pub fn field(&self, name: &str) -> Option<&DiffNode> {
        self.children.get(&PathElement::field_name(name))
    }

    /// Returns the child for a list index.
    pub fn item(&self, index: usize) -> Option<&DiffNode> {
        self.children.get(&PathElement::index(index))
    }

    /// Returns the differing leaves in traversal order. See [`flatten`].
    pub fn leaves(&self) -> Vec<&DiffNode> {
        flatten(self)
    }
}

/// Flattens a tree into its non-Equal leaves.
///
/// The walk is depth-first and pre-order, visiting children in token order:
/// field names lexicographically, list indices numerically. The result is
/// therefore independent of how the tree was built.
pub fn flatten(tree: &DiffNode) -> Vec<&DiffNode> {
    let mut leaves = Vec::new();
    collect_leaves(tree, &mut leaves);
    leaves
}

fn collect_leaves<'a>(node: &'a DiffNode, leaves: &mut Vec<&'a DiffNode>) {
    if !node.is_equal() && node.is_leaf() {
        leaves.push(node);
    }
    for child in node.children.values() {
        collect_leaves(child, leaves);
    }
}

/// DiffSummary counts the differing leaves of a tree by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl DiffSummary {
    pub fn of(tree: &DiffNode) -> Self {
        let mut summary = DiffSummary::default();
        for leaf in flatten(tree) {
            match leaf.kind {
                DiffKind::Added => summary.added += 1,
                DiffKind::Removed => summary.removed += 1,
                DiffKind::Modified => summary.modified += 1,
                DiffKind::Equal => {}
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.added + self.removed + self.modified
    }
}
