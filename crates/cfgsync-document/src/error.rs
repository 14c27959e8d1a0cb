//! Error types for cfgsync-document

/// Result type for cfgsync-document operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cfgsync-document operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    Parse { format: String, message: String },

    #[error("Failed to render {format} content: {message}")]
    Serialize { format: String, message: String },

    #[error("Node at '{path}' is not an object")]
    NotAnObject { path: String },

    #[error("Document path is empty")]
    EmptyPath,
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn serialize(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialize {
            format: format.into(),
            message: message.into(),
        }
    }
}
