//! Machine-readable form of a difference tree.
//!
//! A record is the JSON encoding of [`DiffNode`]:
//!
//! ```json
//! {
//!   "path": "",
//!   "kind": "modified",
//!   "children": {
//!     "name": { "path": "name", "kind": "modified", "before": "a", "after": "b" }
//!   }
//! }
//! ```
//!
//! `before`, `after` and `children` are omitted when absent or empty.
//! Children are keyed by [`PathElement::to_key`](crate::fieldpath::PathElement::to_key),
//! so a field named `[0]` stays distinct from list index 0.

use super::node::DiffNode;

/// Encodes a tree as indented JSON.
pub fn to_json(tree: &DiffNode) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tree)
}

/// Encodes a tree as a `serde_json::Value`.
pub fn to_value(tree: &DiffNode) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(tree)
}

/// Decodes a tree from its JSON record.
pub fn from_json(json: &str) -> Result<DiffNode, serde_json::Error> {
    serde_json::from_str(json)
}
