//! Background reload watcher
//!
//! Polls the storage file's modification time on a dedicated thread and
//! reloads when it moves. Edits landing within one interval collapse into a
//! single reload.

use std::sync::Weak;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Shared;
use crate::error::{Error, Result};
use crate::host::ConfigFields;

/// Handle to a running watcher thread.
///
/// The thread holds only a weak reference to the config, so it exits on its
/// own once the config is dropped. Stopping or dropping the handle ends it
/// at the next wake-up.
#[derive(Debug)]
pub struct Watcher {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Watcher {
    pub(crate) fn spawn<T: ConfigFields>(shared: Weak<Shared<T>>, interval: Duration) -> Result<Self> {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("cfgsync-watcher".to_string())
            .spawn(move || {
                debug!(?interval, "Watcher running");
                loop {
                    match stopped.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    let Some(shared) = shared.upgrade() else {
                        break;
                    };
                    shared.poll();
                }
                debug!("Watcher exited");
            })
            .map_err(Error::WatcherSpawn)?;

        info!(?interval, "Started configuration watcher");
        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for it to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender disconnects the channel
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Watcher thread panicked");
            } else {
                info!("Stopped configuration watcher");
            }
        }
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
