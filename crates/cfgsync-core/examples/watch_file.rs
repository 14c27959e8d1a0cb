//! Keep a config file in sync and print every reload
//!
//! Run, then edit `target/demo/server.json` by hand while it is running.

use std::time::Duration;

use cfgsync_core::{ReloadEvent, SyncedConfig};

cfgsync_core::config_fields! {
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        pub motd: String = "Welcome".to_string(),
        #[category("network")]
        pub network_port: i32 = 8080,
        #[category("network")]
        pub network_allowed: Vec<String> = vec!["127.0.0.1".to_string()],
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    cfgsync_core::logging::init()?;

    let config = SyncedConfig::open("target/demo/server.json", ServerConfig::default())?;
    println!("Watching {} ({})", config.path(), config.format());
    println!("{:#?}", config.snapshot());

    let events = config.subscribe();
    for event in events.iter().take(10) {
        match event {
            ReloadEvent::Loaded { trigger, report } => {
                println!("Reloaded ({trigger:?}): {report:?}");
                println!("{:#?}", config.snapshot());
            }
            ReloadEvent::FieldSet { name } => println!("{name} changed"),
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    Ok(())
}
