//! Storage file locations

use std::fmt;
use std::path::{Path, PathBuf};

/// Location of a storage file, with `/` as the only separator.
///
/// Normalizing once keeps log fields and error messages identical across
/// platforms. I/O always goes through [`to_native`](Self::to_native).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// The path in the form the OS expects.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    pub fn join(&self, segment: &str) -> Self {
        Self::new(self.to_native().join(segment))
    }

    /// The containing directory; `None` for a bare file name.
    pub fn parent(&self) -> Option<Self> {
        Path::new(&self.inner)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Self::new)
    }

    /// Last component, ignoring a trailing separator.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        let name = trimmed.rsplit_once('/').map_or(trimmed, |(_, name)| name);
        (!name.is_empty()).then_some(name)
    }

    /// Text after the last dot of the file name. Dotfiles have none.
    pub fn extension(&self) -> Option<&str> {
        let (stem, ext) = self.file_name()?.rsplit_once('.')?;
        (!stem.is_empty()).then_some(ext)
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

macro_rules! impl_from_path_like {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for NormalizedPath {
                fn from(path: $ty) -> Self {
                    Self::new(path)
                }
            }
        )*
    };
}

impl_from_path_like!(&str, String, PathBuf, &Path, &PathBuf);
