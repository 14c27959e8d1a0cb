//! Declarative configuration synchronizer
//!
//! Keeps a set of typed host fields consistent with a hierarchical document
//! on disk, in both directions:
//!
//! - **Schema**: hosts declare fields (name, type, optional category) with
//!   [`config_fields!`] or a manual [`ConfigFields`] impl
//! - **Coercion**: field values materialize to document nodes and hydrate back
//! - **Persistence**: [`SyncedConfig`] creates the file with defaults, loads it,
//!   heals missing keys, and saves on every `set`
//! - **Watcher**: a background thread reloads after external edits
//!
//! # Architecture
//!
//! ```text
//!        host struct (ConfigFields)
//!                   |
//!              cfgsync-core
//!                   |
//!       +-----------+-----------+
//!       |                       |
//! cfgsync-document         cfgsync-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use cfgsync_core::{FieldType, SyncedConfig};
//!
//! cfgsync_core::config_fields! {
//!     #[derive(Debug, Clone)]
//!     pub struct ChatConfig {
//!         pub motd: String = "Welcome".to_string(),
//!         #[category("limits")]
//!         pub limits_max_players: i32 = 20,
//!         #[category("limits")]
//!         pub limits_banned: Vec<String> = Vec::new(),
//!     }
//! }
//!
//! # fn main() -> cfgsync_core::Result<()> {
//! let config = SyncedConfig::open("config/chat.json", ChatConfig::default())?;
//! config.set("limits_max_players", 32)?;
//! println!("{:?}", config.list_fields(Some(FieldType::INT32)));
//! # Ok(())
//! # }
//! ```

pub mod coerce;
pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod logging;
mod macros;
pub mod options;
pub mod schema;
pub mod storage;
pub mod value;
pub mod watcher;

pub use config::{SyncedConfig, SyncedConfigBuilder};
pub use error::{Error, Result};
pub use events::{LoadReport, LoadTrigger, ReloadEvent};
pub use host::ConfigFields;
pub use options::{DEFAULT_POLL_INTERVAL, SyncOptions};
pub use schema::{ConfigField, Schema, SchemaBuilder, derive_key};
pub use storage::Storage;
pub use value::{ConfigValue, FieldType, FieldValue, ScalarType};
pub use watcher::Watcher;

pub use cfgsync_document::{DocPath, Document, DocumentNode, Format};
