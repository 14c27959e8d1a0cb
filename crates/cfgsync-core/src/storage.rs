//! Storage file access
//!
//! Wraps the filesystem primitives and a document format for one file.
//! Parse failures become `MalformedDocument`; I/O failures become
//! `StorageUnavailable`.

use std::time::SystemTime;

use cfgsync_document::{Document, Format};
use cfgsync_fs::{NormalizedPath, io};
use tracing::trace;

use crate::error::{Error, Result};

/// A configuration file in a fixed format.
#[derive(Debug, Clone)]
pub struct Storage {
    path: NormalizedPath,
    format: Format,
}

impl Storage {
    pub fn new(path: NormalizedPath, format: Format) -> Self {
        Self { path, format }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Modification time, or `None` if the file does not exist.
    pub fn modified(&self) -> Result<Option<SystemTime>> {
        Ok(io::modified_time(&self.path)?)
    }

    /// Create the file empty, along with missing parent directories.
    ///
    /// Returns `false` if it already existed.
    pub fn create_empty(&self) -> Result<bool> {
        Ok(io::create_empty(&self.path)?)
    }

    /// Read and parse the whole file.
    pub fn read_document(&self) -> Result<Document> {
        let content = io::read_text(&self.path)?;
        trace!(path = %self.path, bytes = content.len(), "Read storage");
        Document::parse_as(&content, self.format).map_err(|e| Error::MalformedDocument {
            path: self.path.to_native(),
            message: e.to_string(),
        })
    }

    /// Render and atomically replace the file.
    pub fn write_document(&self, document: &Document) -> Result<()> {
        let content = document.render_as(self.format)?;
        io::write_atomic(&self.path, content.as_bytes())?;
        Ok(())
    }
}
