//! Hosts shared by the cfgsync-core integration tests

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use cfgsync_core::{
    ConfigFields, ConfigValue, Error, FieldType, FieldValue, Result, Schema, ScalarType,
    SyncedConfig,
};

cfgsync_core::config_fields! {
    #[derive(Debug, Clone, PartialEq)]
    #[allow(non_snake_case)]
    pub struct ServerConfig {
        /// Shown to clients on connect
        pub motd: String = "Welcome".to_string(),
        #[category("network")]
        pub network_port: i32 = 8080,
        #[category("network")]
        pub network_hosts: Vec<String> = vec!["localhost".to_string()],
        #[category("limits")]
        pub limits_max_bytes: i64 = 1 << 40,
        #[category("limits")]
        pub limitsEnabled: bool = true,
        pub retry_delays: Vec<i32> = vec![1, 2, 4],
    }
}

/// A hand-written host that counts reload notifications.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountingHost {
    pub level: i64,
    pub tags: Vec<String>,
    pub reloads: usize,
}

impl ConfigFields for CountingHost {
    fn schema() -> Result<Schema> {
        Schema::builder()
            .field("level", FieldType::INT64, Some("log"))
            .field("tags", FieldType::List(ScalarType::String), None)
            .build()
    }

    fn read_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "level" => Some(self.level.to_field_value()),
            "tags" => Some(self.tags.to_field_value()),
            _ => None,
        }
    }

    fn write_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        match name {
            "level" => self.level = i64::from_field_value(name, value)?,
            "tags" => self.tags = Vec::from_field_value(name, value)?,
            _ => {
                return Err(Error::FieldNotFound {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn on_reload(&mut self) {
        self.reloads += 1;
    }
}

/// Open without a watcher so tests control every load.
pub fn open_unwatched<T: ConfigFields>(path: &Path, host: T) -> SyncedConfig<T> {
    SyncedConfig::builder(path)
        .watch(false)
        .open(host)
        .expect("Should open config")
}

/// Open with a fast watcher.
pub fn open_watched<T: ConfigFields>(path: &Path, host: T) -> SyncedConfig<T> {
    SyncedConfig::builder(path)
        .poll_interval(POLL)
        .open(host)
        .expect("Should open config")
}

pub const POLL: Duration = Duration::from_millis(50);

/// Upper bound for anything the watcher is expected to pick up.
pub const SETTLE: Duration = Duration::from_secs(5);
