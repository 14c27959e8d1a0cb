//! Reload notifications

use std::sync::mpsc::{self, Receiver, Sender};

use serde::Serialize;

/// What started a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadTrigger {
    /// A direct call to `load` or `open`
    Explicit,
    /// The watcher noticed a changed modification time
    Watcher,
}

/// Per-field outcome of a load.
///
/// `healed` fields had no node in the file and were filled from their
/// current value; they are also counted in `hydrated`. Fields in
/// `mismatched` kept their previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub hydrated: Vec<String>,
    pub healed: Vec<String>,
    pub mismatched: Vec<String>,
}

impl LoadReport {
    /// True when every field hydrated.
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty()
    }
}

/// Sent to subscribers after the in-memory state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadEvent {
    Loaded {
        trigger: LoadTrigger,
        report: LoadReport,
    },
    FieldSet {
        name: String,
    },
}

#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Vec<Sender<ReloadEvent>>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self) -> Receiver<ReloadEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Deliver to every live receiver, forgetting dropped ones.
    pub(crate) fn notify(&mut self, event: ReloadEvent) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}
