//! Synchronizer options

use std::time::Duration;

use cfgsync_document::Format;

/// Default interval between modification-time polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Options for opening a [`SyncedConfig`](crate::SyncedConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// How often the watcher checks the file's modification time.
    pub poll_interval: Duration,
    /// Start the watcher when the config is opened.
    pub watch: bool,
    /// Storage format. Detected from the file extension when `None`.
    pub format: Option<Format>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            watch: true,
            format: None,
        }
    }
}

impl SyncOptions {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }
}
