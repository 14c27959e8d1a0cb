//! Filesystem primitives for cfgsync
//!
//! Provides normalized path handling and the handful of I/O operations the
//! synchronizer needs: existence checks, text reads, locked atomic writes,
//! empty-file creation and modification-time queries.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;
