//! Storage formats and the handler trait

use crate::error::{Error, Result};
use crate::handlers::{JsonHandler, TomlHandler, YamlHandler};
use crate::node::{DocumentNode, NodeMap};

/// Supported storage formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Detect format from a file path, falling back to JSON.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }

    /// Human-readable format name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        }
    }

    /// Get default file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
            Self::Toml => &["toml"],
        }
    }

    /// Get the handler implementing this format
    pub fn handler(&self) -> Box<dyn FormatHandler> {
        match self {
            Self::Json => Box::new(JsonHandler::new()),
            Self::Yaml => Box::new(YamlHandler::new()),
            Self::Toml => Box::new(TomlHandler::new()),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for format-specific handlers
pub trait FormatHandler: Send + Sync {
    /// Format identifier
    fn format(&self) -> Format;

    /// Parse source text into a root object.
    ///
    /// Whitespace-only source yields an empty root.
    fn parse(&self, source: &str) -> Result<NodeMap>;

    /// Render a root object as stable, human-readable text.
    fn render(&self, root: &NodeMap) -> Result<String>;
}

/// Unwrap a parsed top-level node into the root object.
pub(crate) fn expect_root(format: Format, node: DocumentNode) -> Result<NodeMap> {
    match node {
        DocumentNode::Object(map) => Ok(map),
        other => Err(Error::parse(
            format.name(),
            format!("root element must be an object, found {}", other.kind()),
        )),
    }
}
