//! In-memory document model

use crate::error::{Error, Result};
use crate::format::Format;
use crate::node::{DocumentNode, NodeMap};
use crate::path::DocPath;

/// A hierarchical key/value document whose root is always an object.
///
/// The only implicit-creation point is [`Document::ensure_object`]; [`Document::set`]
/// goes through it to create missing parent objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: NodeMap,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document around an existing root object.
    pub fn from_root(root: NodeMap) -> Self {
        Self { root }
    }

    /// Parse a document from text in the given format.
    pub fn parse_as(source: &str, format: Format) -> Result<Self> {
        format.handler().parse(source).map(Self::from_root)
    }

    /// Render the document as text in the given format.
    pub fn render_as(&self, format: Format) -> Result<String> {
        format.handler().render(&self.root)
    }

    pub fn root(&self) -> &NodeMap {
        &self.root
    }

    pub fn into_root(self) -> NodeMap {
        self.root
    }

    /// Replace the whole tree, returning the previous root.
    pub fn replace_root(&mut self, root: NodeMap) -> NodeMap {
        std::mem::replace(&mut self.root, root)
    }

    /// Get the node at `path`, if every step along it exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgsync_document::{DocPath, Document, DocumentNode, Format};
    ///
    /// let doc = Document::parse_as(r#"{"network": {"port": 8080}}"#, Format::Json).unwrap();
    /// assert_eq!(doc.get(&DocPath::parse("network.port")), Some(&DocumentNode::Int(8080)));
    /// assert_eq!(doc.get(&DocPath::parse("network.host")), None);
    /// ```
    pub fn get(&self, path: &DocPath) -> Option<&DocumentNode> {
        let (last, parents) = path.segments().split_last()?;
        let mut current = &self.root;
        for segment in parents {
            current = current.get(segment)?.as_object()?;
        }
        current.get(last)
    }

    /// Check whether a node exists at `path`.
    pub fn has(&self, path: &DocPath) -> bool {
        self.get(path).is_some()
    }

    /// Set the node at `path`, creating missing parent objects.
    ///
    /// Returns the node previously stored there.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPath` for the root path and `NotAnObject` if a parent
    /// along the path exists but is not an object.
    pub fn set(&mut self, path: &DocPath, node: DocumentNode) -> Result<Option<DocumentNode>> {
        let (key, parent_path) = path.split_last().ok_or(Error::EmptyPath)?;
        let parent = self.ensure_object(&parent_path)?;
        Ok(parent.insert(key, node))
    }

    /// Get the object at `path`, inserting empty objects for missing steps.
    ///
    /// Idempotent: an existing object is returned untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotAnObject` naming the first step that holds a non-object node.
    pub fn ensure_object(&mut self, path: &DocPath) -> Result<&mut NodeMap> {
        let mut current = &mut self.root;
        for (depth, segment) in path.segments().iter().enumerate() {
            if !current.contains_key(segment) {
                current.insert(segment.clone(), DocumentNode::object());
            }
            current = match current.get_mut(segment) {
                Some(DocumentNode::Object(map)) => map,
                _ => {
                    return Err(Error::NotAnObject {
                        path: path.prefix(depth + 1).to_string(),
                    });
                }
            };
        }
        Ok(current)
    }

    /// Remove the node at `path`, returning it if it existed.
    pub fn remove(&mut self, path: &DocPath) -> Option<DocumentNode> {
        let (last, parents) = path.segments().split_last()?;
        let mut current = &mut self.root;
        for segment in parents {
            current = current.get_mut(segment)?.as_object_mut()?;
        }
        current.remove(last)
    }
}
