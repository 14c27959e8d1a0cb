//! Document paths
//!
//! A [`DocPath`] addresses a node by the chain of object keys leading to it.
//!
//! # Path Syntax
//!
//! [`DocPath::parse`] accepts dot-separated keys (`network.port`). Keys that
//! themselves contain dots can only be addressed by building the path from
//! segments with [`DocPath::new`] or [`DocPath::child`].
//!
//! # Examples
//!
//! ```
//! use cfgsync_document::DocPath;
//!
//! let path = DocPath::parse("network.port");
//! assert_eq!(path.segments(), ["network", "port"]);
//! assert_eq!(path.to_string(), "network.port");
//! ```

use std::fmt;

/// A chain of object keys from the document root to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DocPath {
    segments: Vec<String>,
}

impl DocPath {
    /// The empty path, addressing the root object itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from explicit segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dot-separated path. Empty segments are skipped.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Extend this path by one key.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split into the final key and the path of its parent object.
    pub fn split_last(&self) -> Option<(&str, DocPath)> {
        let (last, parents) = self.segments.split_last()?;
        Some((
            last.as_str(),
            DocPath {
                segments: parents.to_vec(),
            },
        ))
    }

    /// The first `len` segments of this path.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for DocPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
