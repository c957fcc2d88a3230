//! Recursive structural comparison of two documents.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::node::DiffNode;
use crate::config::RuleSet;
use crate::fieldpath::{Path, PathElement};
use crate::value::{Map, Value};

/// Nesting depth below which subtrees are compared as whole values.
pub const MAX_DEPTH: usize = 256;

/// Differ compares two documents into a difference tree.
///
/// Fields are matched by name, list items strictly by position. There is
/// no reordering or insertion detection: inserting an item in the middle of
/// a list reports every following index as changed.
///
/// A null value is treated as an absent one, so `null -> 5` is reported as
/// Added and `5 -> null` as Removed. Values of different kinds (a string
/// and a number, say) are always Modified, even if they print the same.
#[derive(Debug, Clone, Copy)]
pub struct Differ<'a> {
    rules: &'a RuleSet,
    show_all: bool,
}

impl<'a> Differ<'a> {
    /// Creates a differ. With `show_all`, no path is ever ignored.
    pub fn new(rules: &'a RuleSet, show_all: bool) -> Self {
        Differ { rules, show_all }
    }

    /// Compares two documents. The returned tree is rooted at the empty path.
    pub fn compare(&self, lhs: &Map, rhs: &Map) -> DiffNode {
        debug!(
            lhs_fields = lhs.len(),
            rhs_fields = rhs.len(),
            show_all = self.show_all,
            "comparing documents"
        );
        let tree = self.compare_maps(lhs, rhs, &Path::new(), 0);
        debug!(kind = %tree.kind, "comparison finished");
        tree
    }

    fn is_ignored(&self, path: &str) -> bool {
        !self.show_all && self.rules.should_ignore(path)
    }

    fn compare_maps(&self, lhs: &Map, rhs: &Map, path: &Path, depth: usize) -> DiffNode {
        let keys: BTreeSet<&String> = lhs.keys().chain(rhs.keys()).collect();

        let mut children = BTreeMap::new();
        for key in keys {
            let element = PathElement::field_name(key.as_str());
            let field_path = path.with(element.clone());
            let field = field_path.to_string();

            // Ignored fields leave no trace in the tree.
            if self.is_ignored(&field) {
                continue;
            }

            let child = match (lhs.get(key), rhs.get(key)) {
                (Some(before), Some(after)) => {
                    self.compare_values(before, after, &field_path, depth + 1)
                }
                (None, Some(after)) => DiffNode::added(field, after.clone()),
                (Some(before), None) => DiffNode::removed(field, before.clone()),
                (None, None) => continue,
            };
            children.insert(element, child);
        }

        DiffNode::branch(path.to_string(), children)
    }

    fn compare_lists(&self, lhs: &[Value], rhs: &[Value], path: &Path, depth: usize) -> DiffNode {
        let len = lhs.len().max(rhs.len());

        let mut children = BTreeMap::new();
        for i in 0..len {
            let element = PathElement::index(i);
            let item_path = path.with(element.clone());

            let child = match (lhs.get(i), rhs.get(i)) {
                (Some(before), Some(after)) => {
                    self.compare_values(before, after, &item_path, depth + 1)
                }
                (None, Some(after)) => DiffNode::added(item_path.to_string(), after.clone()),
                (Some(before), None) => DiffNode::removed(item_path.to_string(), before.clone()),
                (None, None) => continue,
            };
            children.insert(element, child);
        }

        DiffNode::branch(path.to_string(), children)
    }

    fn compare_values(&self, lhs: &Value, rhs: &Value, path: &Path, depth: usize) -> DiffNode {
        match (lhs, rhs) {
            (Value::Null, Value::Null) => DiffNode::equal(path.to_string()),
            (Value::Null, after) => DiffNode::added(path.to_string(), after.clone()),
            (before, Value::Null) => DiffNode::removed(path.to_string(), before.clone()),
            (before, after) if before.kind() != after.kind() => {
                DiffNode::modified(path.to_string(), before.clone(), after.clone())
            }
            (before, after) if depth >= MAX_DEPTH && before.is_compound() => {
                debug!(path = %path, depth, "nesting limit reached, comparing subtree as a whole");
                self.compare_scalars(before, after, path)
            }
            (Value::Map(before), Value::Map(after)) => {
                self.compare_maps(before, after, path, depth)
            }
            (Value::List(before), Value::List(after)) => {
                self.compare_lists(before, after, path, depth)
            }
            (before, after) => self.compare_scalars(before, after, path),
        }
    }

    fn compare_scalars(&self, lhs: &Value, rhs: &Value, path: &Path) -> DiffNode {
        if lhs == rhs {
            DiffNode::equal(path.to_string())
        } else {
            DiffNode::modified(path.to_string(), lhs.clone(), rhs.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffKind;
    use crate::value::from_json;

    fn doc(json: &str) -> Map {
        from_json(json).unwrap().into_map().unwrap()
    }

    #[test]
    fn test_compare_equal() {
        let rules = RuleSet::defaults();
        let d = doc(r#"{"name": "vm", "zone": "us-central1-a"}"#);
        let tree = Differ::new(&rules, false).compare(&d, &d);

        assert!(tree.is_equal());
        assert_eq!(tree.path, "");
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_compare_empty_documents() {
        let rules = RuleSet::empty();
        let tree = Differ::new(&rules, false).compare(&Map::new(), &Map::new());
        assert!(tree.is_equal());
    }

    #[test]
    fn test_deep_nesting_is_compared_wholesale() {
        fn nest(depth: usize, leaf: Value) -> Value {
            (0..depth).fold(leaf, |inner, _| {
                Value::Map(Map::from_iter([("n".to_string(), inner)]))
            })
        }

        let rules = RuleSet::empty();
        let lhs = nest(MAX_DEPTH + 10, Value::Int(1)).into_map().unwrap();
        let rhs = nest(MAX_DEPTH + 10, Value::Int(2)).into_map().unwrap();

        let tree = Differ::new(&rules, false).compare(&lhs, &rhs);
        let leaves = tree.leaves();

        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].kind, DiffKind::Modified);
        assert!(leaves[0].before.as_ref().is_some_and(Value::is_compound));
        assert_eq!(leaves[0].path.matches('.').count(), MAX_DEPTH - 1);

        let same = Differ::new(&rules, false).compare(&lhs, &lhs);
        assert!(same.is_equal());
    }
}
