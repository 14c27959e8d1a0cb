//! [`TestConfigFile`] fixture for synchronizer scenarios.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// A configuration file path inside a fresh temporary directory.
///
/// The file itself is not created; that is left to the code under test.
///
/// # Example
///
/// ```rust
/// use cfgsync_test_utils::TestConfigFile;
///
/// let file = TestConfigFile::nested("app.json");
/// assert!(!file.exists());
/// file.write_external("{}");
/// assert_eq!(file.read(), "{}");
/// ```
pub struct TestConfigFile {
    temp_dir: TempDir,
    path: PathBuf,
}

impl TestConfigFile {
    /// A file directly inside the temporary directory.
    pub fn new(file_name: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(file_name);
        Self { temp_dir, path }
    }

    /// A file two directories below the temporary directory, neither of
    /// which exists yet.
    pub fn nested(file_name: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config").join("app").join(file_name);
        Self { temp_dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the file as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self) -> String {
        fs::read_to_string(&self.path)
            .unwrap_or_else(|e| panic!("Could not read {}: {e}", self.path.display()))
    }

    /// Read the file as JSON.
    ///
    /// # Panics
    /// Panics if the file is not valid JSON.
    pub fn read_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.read())
            .unwrap_or_else(|e| panic!("{} is not valid JSON: {e}", self.path.display()))
    }

    /// Replace the file as an external editor would.
    ///
    /// The modification time is moved strictly past its previous value, so
    /// the change is visible even on filesystems with coarse timestamps.
    pub fn write_external(&self, content: &str) {
        let previous = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&self.path, content).unwrap();

        let bumped = previous.max(SystemTime::now()) + Duration::from_secs(2);
        File::options()
            .write(true)
            .open(&self.path)
            .and_then(|f| f.set_modified(bumped))
            .unwrap();
    }

    /// Assert that the file contains `needle`.
    ///
    /// # Panics
    /// Panics with the file content if it does not.
    pub fn assert_contains(&self, needle: &str) {
        let content = self.read();
        assert!(
            content.contains(needle),
            "{} does not contain expected content.\nExpected: {needle}\nActual: {content}",
            self.path.display()
        );
    }
}
