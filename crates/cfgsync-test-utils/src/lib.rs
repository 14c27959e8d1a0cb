//! Shared test utilities for the cfgsync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`file`]: [`TestConfigFile`], a configuration file in a temporary directory
//! - [`wait`]: bounded polling for conditions that change on another thread

pub mod file;
pub mod wait;

pub use file::TestConfigFile;
pub use wait::wait_until;
