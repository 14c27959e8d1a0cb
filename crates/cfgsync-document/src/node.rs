//! Document node types
//!
//! A [`DocumentNode`] is a closed tagged value; every coercion site matches on
//! it exhaustively. Objects are stored in a [`NodeMap`], which keeps keys in
//! insertion order so rendered files stay diff-friendly.

use std::fmt;

/// A single value in a hierarchical document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Null,
    String(String),
    Int(i64),
    /// Non-integer numbers found in hand-edited files; kept so they survive a save.
    Float(f64),
    Bool(bool),
    List(Vec<DocumentNode>),
    Object(NodeMap),
}

/// The kind tag of a [`DocumentNode`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    String,
    Int,
    Float,
    Bool,
    List,
    Object,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::String => "string",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Bool => "boolean",
            Self::List => "list",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

impl DocumentNode {
    /// Create an empty object node.
    pub fn object() -> Self {
        Self::Object(NodeMap::new())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Null => NodeKind::Null,
            Self::String(_) => NodeKind::String,
            Self::Int(_) => NodeKind::Int,
            Self::Float(_) => NodeKind::Float,
            Self::Bool(_) => NodeKind::Bool,
            Self::List(_) => NodeKind::List,
            Self::Object(_) => NodeKind::Object,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[DocumentNode]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&NodeMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut NodeMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

impl From<&str> for DocumentNode {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for DocumentNode {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for DocumentNode {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for DocumentNode {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<bool> for DocumentNode {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<DocumentNode>> for DocumentNode {
    fn from(items: Vec<DocumentNode>) -> Self {
        Self::List(items)
    }
}

impl From<NodeMap> for DocumentNode {
    fn from(map: NodeMap) -> Self {
        Self::Object(map)
    }
}

/// An insertion-ordered mapping of keys to nodes.
///
/// Configuration documents are small, so lookups are linear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeMap {
    entries: Vec<(String, DocumentNode)>,
}

impl NodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&DocumentNode> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut DocumentNode> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert a node, returning the previous one.
    ///
    /// Replacing an existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, node: DocumentNode) -> Option<DocumentNode> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, node)),
            None => {
                self.entries.push((key, node));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<DocumentNode> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocumentNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, DocumentNode)> for NodeMap {
    fn from_iter<I: IntoIterator<Item = (String, DocumentNode)>>(iter: I) -> Self {
        let mut map = NodeMap::new();
        for (key, node) in iter {
            map.insert(key, node);
        }
        map
    }
}

impl IntoIterator for NodeMap {
    type Item = (String, DocumentNode);
    type IntoIter = std::vec::IntoIter<(String, DocumentNode)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position_on_replace() {
        let mut map = NodeMap::new();
        map.insert("a", DocumentNode::from(1));
        map.insert("b", DocumentNode::from(2));
        let previous = map.insert("a", DocumentNode::from(3));

        assert_eq!(previous, Some(DocumentNode::Int(1)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&DocumentNode::Int(3)));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut map: NodeMap = [
            ("x".to_string(), DocumentNode::Null),
            ("y".to_string(), DocumentNode::Bool(true)),
            ("z".to_string(), DocumentNode::from("s")),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.remove("y"), Some(DocumentNode::Bool(true)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["x", "z"]);
        assert_eq!(map.remove("missing"), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(DocumentNode::Int(1).kind().to_string(), "integer");
        assert_eq!(DocumentNode::object().kind(), NodeKind::Object);
        assert_eq!(DocumentNode::List(vec![]).kind().to_string(), "list");
    }
}
