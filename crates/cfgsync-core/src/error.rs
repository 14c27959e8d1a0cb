//! Error types for cfgsync-core

use std::fmt;
use std::path::PathBuf;

use crate::value::FieldType;

/// Result type for cfgsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synchronizing configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The storage file or its parent directory cannot be created, read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] cfgsync_fs::Error),

    /// The storage file exists but its content does not parse
    #[error("Malformed document at {path}: {message}")]
    MalformedDocument { path: PathBuf, message: String },

    /// A value's kind disagrees with a field's declared type
    #[error("Type mismatch for field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        found: String,
    },

    /// An accessor referenced a name no field was registered under
    #[error("Field not found: {name}")]
    FieldNotFound { name: String },

    /// A field was declared with a type outside the supported set
    #[error("Unsupported type '{type_name}' for field '{field}'")]
    UnsupportedFieldType { field: String, type_name: String },

    /// Two fields were registered under the same name
    #[error("Field '{name}' is declared more than once")]
    DuplicateField { name: String },

    /// Two fields resolve to overlapping document locations
    #[error("Fields '{field}' and '{other}' conflict at document path '{path}'")]
    PathConflict {
        field: String,
        other: String,
        path: String,
    },

    /// The background watcher thread could not be started
    #[error("Failed to start watcher thread: {0}")]
    WatcherSpawn(#[source] std::io::Error),

    // Transparent wrapper for the document layer
    /// Document error from cfgsync-document
    #[error(transparent)]
    Document(#[from] cfgsync_document::Error),
}

impl Error {
    pub(crate) fn type_mismatch(
        field: impl Into<String>,
        expected: FieldType,
        found: impl fmt::Display,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            found: found.to_string(),
        }
    }

    pub(crate) fn field_not_found(name: impl Into<String>) -> Self {
        Self::FieldNotFound { name: name.into() }
    }
}
