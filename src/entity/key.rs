//! Hierarchical document keys
//!
//! A key is an ordered ancestor path of (kind, id) elements, root first.
//! The last element names the document itself; the elements before it
//! are its ancestors. Ids are either writer-assigned integers or
//! caller-chosen names.

use std::fmt;

/// Identifier of one path element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementId {
    /// Numeric id
    Id(i64),
    /// String name
    Name(String),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Id(id) => write!(f, "{}", id),
            ElementId::Name(name) => write!(f, "{}", name),
        }
    }
}

/// One (kind, id) element of an ancestor path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathElement {
    /// Collection kind, e.g. "Country"
    pub kind: String,
    /// Element identifier within the kind
    pub id: ElementId,
}

impl PathElement {
    /// Creates an element with a string name id.
    pub fn named(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: ElementId::Name(name.into()),
        }
    }

    /// Creates an element with a numeric id.
    pub fn numbered(kind: impl Into<String>, id: i64) -> Self {
        Self {
            kind: kind.into(),
            id: ElementId::Id(id),
        }
    }

    /// Returns the `"{kind}:{id}"` segment string used as a tree key.
    pub fn segment(&self) -> String {
        format!("{}:{}", self.kind, self.id)
    }
}

/// A document's full ancestor key path, root to leaf.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Key {
    /// Ordered path elements, root first
    pub path: Vec<PathElement>,
}

impl Key {
    /// Creates a key from its path elements.
    pub fn new(path: Vec<PathElement>) -> Self {
        Self { path }
    }

    /// Returns true if the key has no elements.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns the `"Kind:id/Kind:id"` textual form of the path.
    pub fn path_string(&self) -> String {
        let segments: Vec<String> = self.path.iter().map(PathElement::segment).collect();
        segments.join("/")
    }
}
