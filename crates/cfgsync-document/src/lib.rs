//! Hierarchical document model for cfgsync
//!
//! Provides the in-memory tree that mirrors a configuration file:
//! a closed [`DocumentNode`] value type, insertion-ordered objects,
//! key paths, and JSON/YAML/TOML codecs behind [`FormatHandler`].

pub mod document;
pub mod error;
pub mod format;
pub mod handlers;
pub mod node;
pub mod path;

pub use document::Document;
pub use error::{Error, Result};
pub use format::{Format, FormatHandler};
pub use node::{DocumentNode, NodeKind, NodeMap};
pub use path::DocPath;
