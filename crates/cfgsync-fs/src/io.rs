//! Whole-file reads and crash-safe writes of storage files

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Distinguishes temp files of concurrent writers within one process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn ensure_parent(target: &Path) -> Result<()> {
    match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
        }
        _ => Ok(()),
    }
}

/// Replace the file at `path` with `content`.
///
/// The bytes go to a sibling temp file held under an exclusive `fs2` lock,
/// are flushed to disk, then renamed over the target. Readers see either
/// the old file or the new one, never a prefix.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    ensure_parent(&target)?;

    // Same directory as the target so the rename stays on one filesystem
    let stem = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let staging = target.with_file_name(format!(".{stem}.{}.{seq}.tmp", std::process::id()));

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&staging)
        .map_err(|e| Error::io(&staging, e))?;

    let lock_failed = |_: std::io::Error| Error::LockFailed {
        path: target.clone(),
    };
    file.lock_exclusive().map_err(lock_failed)?;

    if let Err(e) = file.write_all(content).and_then(|()| file.sync_all()) {
        let _ = fs::remove_file(&staging);
        return Err(Error::io(&staging, e));
    }
    file.unlock().map_err(lock_failed)?;
    drop(file);

    fs::rename(&staging, &target).map_err(|e| {
        let _ = fs::remove_file(&staging);
        Error::io(&target, e)
    })?;

    tracing::trace!(path = %path, bytes = content.len(), "Wrote file atomically");
    Ok(())
}

/// The whole file as UTF-8.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let target = path.to_native();
    fs::read_to_string(&target).map_err(|e| Error::io(&target, e))
}

/// [`write_atomic`] for rendered documents.
pub fn write_text(path: &NormalizedPath, text: &str) -> Result<()> {
    write_atomic(path, text.as_bytes())
}

/// Create an empty file, including any missing parent directories.
///
/// Returns `false` without touching the file when it already exists.
pub fn create_empty(path: &NormalizedPath) -> Result<bool> {
    let target = path.to_native();
    ensure_parent(&target)?;

    match OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(Error::io(&target, e)),
    }
}

/// Query the last modification time of a file.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn modified_time(path: &NormalizedPath) -> Result<Option<SystemTime>> {
    let target = path.to_native();
    match fs::metadata(&target) {
        Ok(meta) => meta.modified().map(Some).map_err(|e| Error::io(&target, e)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&target, e)),
    }
}
