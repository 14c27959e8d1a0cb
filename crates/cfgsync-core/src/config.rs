//! The synchronized configuration
//!
//! [`SyncedConfig`] owns a host struct and the document mirroring its file.
//! All state sits behind one mutex held for the whole of each load, save and
//! set, so explicit calls and watcher reloads never interleave.

use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::{Duration, SystemTime};

use cfgsync_document::{Document, Format};
use cfgsync_fs::NormalizedPath;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::coerce;
use crate::error::{Error, Result};
use crate::events::{LoadReport, LoadTrigger, ReloadEvent, Subscribers};
use crate::host::ConfigFields;
use crate::options::SyncOptions;
use crate::schema::{ConfigField, Schema};
use crate::storage::Storage;
use crate::value::{ConfigValue, FieldType, FieldValue};
use crate::watcher::Watcher;

struct State<T> {
    host: T,
    document: Document,
    last_synced: Option<SystemTime>,
    subscribers: Subscribers,
}

/// State shared between the owning handle and its watcher thread.
pub(crate) struct Shared<T> {
    storage: Storage,
    schema: Schema,
    state: Mutex<State<T>>,
}

impl<T: ConfigFields> Shared<T> {
    fn ensure_exists(&self) -> Result<bool> {
        let mut state = self.state.lock();
        if !self.storage.create_empty()? {
            return Ok(false);
        }

        let mut document = Document::new();
        for field in &self.schema {
            let value = read_host(&state.host, field)?;
            document.set(&field.path(), coerce::materialize(&value))?;
        }
        self.storage.write_document(&document)?;
        state.document = document;

        info!(
            path = %self.storage.path(),
            fields = self.schema.len(),
            "Created configuration file with defaults"
        );
        Ok(true)
    }

    pub(crate) fn load(&self, trigger: LoadTrigger) -> Result<LoadReport> {
        let mut state = self.state.lock();

        // Sampled before reading so a write racing the read is seen next poll
        let modified = self.storage.modified()?;
        let mut document = self.storage.read_document()?;

        let state = &mut *state;
        let mut report = LoadReport::default();
        for field in &self.schema {
            let name = field.name();
            let path = field.path();

            if !document.has(&path) {
                let Some(current) = state.host.read_field(name) else {
                    warn!(field = name, "Host does not expose a registered field");
                    report.mismatched.push(name.to_string());
                    continue;
                };
                if let Err(e) = document.set(&path, coerce::materialize(&current)) {
                    warn!(field = name, path = %path, error = %e, "Cannot heal missing key");
                    report.mismatched.push(name.to_string());
                    continue;
                }
                debug!(field = name, path = %path, "Healed missing key with current value");
                report.healed.push(name.to_string());
            }

            let hydrated = document
                .get(&path)
                .ok_or_else(|| Error::field_not_found(name))
                .and_then(|node| coerce::hydrate(field, node))
                .and_then(|value| state.host.write_field(name, value));
            match hydrated {
                Ok(()) => report.hydrated.push(name.to_string()),
                Err(e) => {
                    warn!(field = name, error = %e, "Keeping previous value");
                    report.mismatched.push(name.to_string());
                }
            }
        }

        state.document = document;
        state.last_synced = modified;
        state.host.on_reload();

        info!(
            path = %self.storage.path(),
            ?trigger,
            hydrated = report.hydrated.len(),
            healed = report.healed.len(),
            mismatched = report.mismatched.len(),
            "Loaded configuration"
        );
        state.subscribers.notify(ReloadEvent::Loaded {
            trigger,
            report: report.clone(),
        });
        Ok(report)
    }

    fn save(&self) -> Result<()> {
        let state = self.state.lock();
        self.storage.write_document(&state.document)?;
        debug!(path = %self.storage.path(), "Saved configuration");
        Ok(())
    }

    fn set(&self, name: &str, value: FieldValue) -> Result<()> {
        let field = self.field(name)?;
        let value = coerce::convert(name, value, field.field_type())?;

        let mut state = self.state.lock();
        let state = &mut *state;
        let previous = read_host(&state.host, field)?;

        let mut document = state.document.clone();
        document.set(&field.path(), coerce::materialize(&value))?;
        state.host.write_field(name, value)?;

        if let Err(e) = self.storage.write_document(&document) {
            // Roll the host back so memory still matches the last persisted state
            state.host.write_field(name, previous)?;
            return Err(e);
        }
        state.document = document;
        state.host.on_reload();

        debug!(field = name, path = %self.storage.path(), "Field set and saved");
        state.subscribers.notify(ReloadEvent::FieldSet {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Reload if the file's modification time moved since the last load.
    pub(crate) fn poll(&self) {
        let modified = match self.storage.modified() {
            Ok(Some(modified)) => modified,
            Ok(None) => return,
            Err(e) => {
                warn!(path = %self.storage.path(), error = %e, "Cannot query modification time");
                return;
            }
        };
        if self.state.lock().last_synced == Some(modified) {
            return;
        }

        debug!(path = %self.storage.path(), "Detected external change");
        if let Err(e) = self.load(LoadTrigger::Watcher) {
            warn!(path = %self.storage.path(), error = %e, "Reload failed; keeping previous values");
        }
    }

    fn field(&self, name: &str) -> Result<&ConfigField> {
        self.schema
            .get(name)
            .ok_or_else(|| Error::field_not_found(name))
    }
}

fn read_host<T: ConfigFields>(host: &T, field: &ConfigField) -> Result<FieldValue> {
    host.read_field(field.name())
        .ok_or_else(|| Error::field_not_found(field.name()))
}

/// Builder for [`SyncedConfig`].
pub struct SyncedConfigBuilder<T> {
    path: NormalizedPath,
    options: SyncOptions,
    host: PhantomData<fn() -> T>,
}

impl<T: ConfigFields> SyncedConfigBuilder<T> {
    pub fn options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    pub fn watch(mut self, watch: bool) -> Self {
        self.options.watch = watch;
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.options.format = Some(format);
        self
    }

    /// Open the file for `host`.
    ///
    /// Creates the file from the host's current values if it does not exist,
    /// loads it into the host, then starts the watcher unless disabled.
    ///
    /// # Errors
    ///
    /// Returns schema errors from `T::schema()`, `FieldNotFound` if the host
    /// does not expose one of its registered fields, and any error from the
    /// initial create or load.
    pub fn open(self, host: T) -> Result<SyncedConfig<T>> {
        let schema = T::schema()?;
        for field in &schema {
            read_host(&host, field)?;
        }

        let format = self
            .options
            .format
            .unwrap_or_else(|| Format::from_path(self.path.to_native()));
        let storage = Storage::new(self.path, format);

        let config = SyncedConfig {
            shared: Arc::new(Shared {
                storage,
                schema,
                state: Mutex::new(State {
                    host,
                    document: Document::new(),
                    last_synced: None,
                    subscribers: Subscribers::default(),
                }),
            }),
            poll_interval: self.options.poll_interval,
            watcher: Mutex::new(None),
        };

        config.ensure_exists()?;
        config.load()?;
        if self.options.watch {
            config.start_watcher()?;
        }
        Ok(config)
    }
}

impl<T> std::fmt::Debug for SyncedConfigBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncedConfigBuilder")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

/// A host struct kept in sync with a configuration file.
///
/// # Example
///
/// ```no_run
/// use cfgsync_core::SyncedConfig;
///
/// cfgsync_core::config_fields! {
///     pub struct AppConfig {
///         #[category("server")]
///         pub server_port: i32 = 8080,
///     }
/// }
///
/// # fn main() -> cfgsync_core::Result<()> {
/// let config = SyncedConfig::open("config/app.json", AppConfig::default())?;
/// config.set("server_port", 9090)?;
/// assert_eq!(config.get_as::<i32>("server_port")?, 9090);
/// # Ok(())
/// # }
/// ```
pub struct SyncedConfig<T: ConfigFields> {
    shared: Arc<Shared<T>>,
    poll_interval: Duration,
    watcher: Mutex<Option<Watcher>>,
}

impl<T: ConfigFields> SyncedConfig<T> {
    pub fn builder(path: impl Into<NormalizedPath>) -> SyncedConfigBuilder<T> {
        SyncedConfigBuilder {
            path: path.into(),
            options: SyncOptions::default(),
            host: PhantomData,
        }
    }

    /// Open `path` for `host` with default options.
    pub fn open(path: impl Into<NormalizedPath>, host: T) -> Result<Self> {
        Self::builder(path).open(host)
    }

    /// Create the file from the host's current values if it is missing.
    ///
    /// Returns `true` if the file was created.
    pub fn ensure_exists(&self) -> Result<bool> {
        self.shared.ensure_exists()
    }

    /// Replace the in-memory state with the file's content.
    ///
    /// Keys missing from the file are healed in memory from the host's
    /// current values. Fields whose node has the wrong type keep their value
    /// and are listed in the report.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` or `MalformedDocument`; in either case nothing in
    /// memory changes.
    pub fn load(&self) -> Result<LoadReport> {
        self.shared.load(LoadTrigger::Explicit)
    }

    /// Write the in-memory document to the file.
    pub fn save(&self) -> Result<()> {
        self.shared.save()
    }

    /// Current value of a field.
    pub fn get(&self, name: &str) -> Result<FieldValue> {
        let field = self.shared.field(name)?;
        read_host(&self.shared.state.lock().host, field)
    }

    /// Current value of a field as a Rust type, converting integer widths
    /// when lossless.
    pub fn get_as<V: ConfigValue>(&self, name: &str) -> Result<V> {
        let value = coerce::convert(name, self.get(name)?, V::FIELD_TYPE)?;
        V::from_field_value(name, value)
    }

    /// Set a field, persist the whole document, and fire the reload hook.
    ///
    /// # Errors
    ///
    /// `FieldNotFound` for an unknown name, `TypeMismatch` if `value` cannot
    /// be converted losslessly, or a storage error. Nothing changes on error.
    pub fn set(&self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.shared.set(name, value.into())
    }

    /// Names of registered fields, optionally only those of one type.
    pub fn list_fields(&self, filter: Option<FieldType>) -> Vec<String> {
        self.shared.schema.names(filter)
    }

    pub fn schema(&self) -> &Schema {
        &self.shared.schema
    }

    /// Run `f` with the host struct borrowed.
    pub fn with_host<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.state.lock().host)
    }

    /// Copy of the in-memory document.
    pub fn document(&self) -> Document {
        self.shared.state.lock().document.clone()
    }

    /// Modification time recorded by the last successful load.
    pub fn last_synced(&self) -> Option<SystemTime> {
        self.shared.state.lock().last_synced
    }

    pub fn path(&self) -> &NormalizedPath {
        self.shared.storage.path()
    }

    pub fn format(&self) -> Format {
        self.shared.storage.format()
    }

    /// Receive an event after every load and every `set`.
    pub fn subscribe(&self) -> Receiver<ReloadEvent> {
        self.shared.state.lock().subscribers.subscribe()
    }

    /// Start polling for external changes. Returns `false` if already running.
    pub fn start_watcher(&self) -> Result<bool> {
        let mut watcher = self.watcher.lock();
        if watcher.is_some() {
            return Ok(false);
        }
        *watcher = Some(Watcher::spawn(
            Arc::downgrade(&self.shared),
            self.poll_interval,
        )?);
        Ok(true)
    }

    /// Stop polling. Returns `false` if the watcher was not running.
    pub fn stop_watcher(&self) -> bool {
        match self.watcher.lock().take() {
            Some(watcher) => {
                watcher.stop();
                true
            }
            None => false,
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.lock().is_some()
    }
}

impl<T: ConfigFields + Clone> SyncedConfig<T> {
    /// Clone of the host struct.
    pub fn snapshot(&self) -> T {
        self.with_host(T::clone)
    }
}

impl<T: ConfigFields> Drop for SyncedConfig<T> {
    fn drop(&mut self) {
        self.stop_watcher();
    }
}

impl<T: ConfigFields> std::fmt::Debug for SyncedConfig<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncedConfig")
            .field("path", self.path())
            .field("format", &self.format())
            .field("fields", &self.shared.schema.len())
            .field("watching", &self.is_watching())
            .finish()
    }
}
