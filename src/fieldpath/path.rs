//! Path element and path types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// PathElement represents one level of path navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Field name for map fields.
    FieldName(String),
    /// Position within a list.
    Index(usize),
}

impl PathElement {
    /// Creates a new field name path element.
    pub fn field_name(name: impl Into<String>) -> Self {
        PathElement::FieldName(name.into())
    }

    /// Creates a new index path element.
    pub fn index(i: usize) -> Self {
        PathElement::Index(i)
    }

    /// Returns true if this is a field name element.
    pub fn is_field_name(&self) -> bool {
        matches!(self, PathElement::FieldName(_))
    }

    /// Returns true if this is an index element.
    pub fn is_index(&self) -> bool {
        matches!(self, PathElement::Index(_))
    }

    /// Returns the field name if this is a field name element.
    pub fn as_field_name(&self) -> Option<&str> {
        match self {
            PathElement::FieldName(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the position if this is an index element.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathElement::Index(i) => Some(*i),
            _ => None,
        }
    }

    /// Parses a token as produced by `Display`: `[3]` is an index,
    /// anything else a field name.
    pub fn parse_token(token: &str) -> Self {
        parse_index(token)
            .map(PathElement::Index)
            .unwrap_or_else(|| PathElement::FieldName(token.to_string()))
    }

    /// Returns the token used as a record key.
    ///
    /// Unlike `Display`, the key is unambiguous: a field name that would
    /// read back as an index, or that starts with the escape character,
    /// is prefixed with `\`.
    pub fn to_key(&self) -> String {
        match self {
            PathElement::FieldName(name)
                if name.starts_with(KEY_ESCAPE) || parse_index(name).is_some() =>
            {
                format!("{}{}", KEY_ESCAPE, name)
            }
            other => other.to_string(),
        }
    }

    /// Parses a record key as produced by [`PathElement::to_key`].
    pub fn from_key(key: &str) -> Self {
        match key.strip_prefix(KEY_ESCAPE) {
            Some(name) => PathElement::FieldName(name.to_string()),
            None => PathElement::parse_token(key),
        }
    }
}

const KEY_ESCAPE: char = '\\';

fn parse_index(token: &str) -> Option<usize> {
    token
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .and_then(|digits| digits.parse::<usize>().ok())
}

impl PartialOrd for PathElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathElement {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PathElement::FieldName(a), PathElement::FieldName(b)) => a.cmp(b),
            (PathElement::Index(a), PathElement::Index(b)) => a.cmp(b),
            // Field names come before indices.
            (PathElement::FieldName(_), PathElement::Index(_)) => Ordering::Less,
            (PathElement::Index(_), PathElement::FieldName(_)) => Ordering::Greater,
        }
    }
}

/// The local token of an element: `name` or `[3]`.
impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::FieldName(name) => f.write_str(name),
            PathElement::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl Serialize for PathElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_key())
    }
}

impl<'de> Deserialize<'de> for PathElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(PathElement::from_key(&token))
    }
}

/// Path represents a complete path to a nested field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Path {
            elements: Vec::new(),
        }
    }

    /// Creates a path from a vector of elements.
    pub fn from_elements(elements: Vec<PathElement>) -> Self {
        Path { elements }
    }

    /// Returns the number of elements in the path.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over the path elements.
    pub fn iter(&self) -> impl Iterator<Item = &PathElement> {
        self.elements.iter()
    }

    /// Appends a path element.
    pub fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    /// Returns the last path element.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// Creates a new path with the given element appended.
    pub fn with(&self, element: PathElement) -> Self {
        let mut new_path = self.clone();
        new_path.push(element);
        new_path
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<T: IntoIterator<Item = PathElement>>(iter: T) -> Self {
        Path {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Dot/bracket notation: `spec.disks[0].type`. The root path is empty.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 && element.is_field_name() {
                f.write_str(".")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}
