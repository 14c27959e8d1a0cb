//! Failure paths of the storage primitives

use cfgsync_fs::{Error, NormalizedPath, io};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_directories_are_created_on_write() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("etc").join("app").join("server.json"));

    io::write_text(&path, "{}").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "{}");
}

#[test]
fn test_regular_file_in_place_of_directory() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("etc");
    fs::write(&blocker, "plain file").unwrap();
    let path = NormalizedPath::new(blocker.join("server.json"));

    let err = io::create_empty(&path).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "unexpected error: {err}");
    assert_eq!(err.path(), blocker.as_path());

    assert!(io::write_text(&path, "{}").is_err());
    assert!(io::modified_time(&path).is_err());
}

#[test]
fn test_reading_missing_file_names_the_path() {
    let dir = tempdir().unwrap();
    let native = dir.path().join("absent.json");

    let err = io::read_text(&NormalizedPath::new(&native)).unwrap_err();
    assert_eq!(err.path(), native.as_path());
    assert!(err.to_string().contains("absent.json"));
}

#[cfg(unix)]
mod permission_tests {
    use super::*;
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    // Root ignores permission bits
    fn running_as_root() -> bool {
        std::process::Command::new("id")
            .arg("-u")
            .output()
            .map(|out| String::from_utf8_lossy(&out.stdout).trim() == "0")
            .unwrap_or(false)
    }

    #[test]
    fn test_read_only_directory_keeps_previous_content() {
        if running_as_root() {
            return;
        }
        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let target = locked.join("server.json");
        fs::write(&target, "previous").unwrap();
        fs::set_permissions(&locked, Permissions::from_mode(0o555)).unwrap();

        let result = io::write_text(&NormalizedPath::new(&target), "next");
        let _ = fs::set_permissions(&locked, Permissions::from_mode(0o755));

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "previous");
    }
}
