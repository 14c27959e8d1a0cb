//! Concurrency scenarios
//!
//! Runtime `set` calls race the watcher reloading external edits. The
//! single state lock must keep the file parseable and memory consistent
//! with some write that actually happened.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cfgsync_core::SyncedConfig;
use cfgsync_document::{Document, Format};
use cfgsync_test_utils::TestConfigFile;

cfgsync_core::config_fields! {
    #[derive(Debug, Clone)]
    pub struct Counters {
        #[category("stats")]
        pub stats_a: i64 = 0,
        #[category("stats")]
        pub stats_b: i64 = 0,
    }
}

#[test]
fn test_sets_race_external_edits() {
    let file = TestConfigFile::new("counters.json");
    let config = Arc::new(
        SyncedConfig::builder(file.path())
            .poll_interval(Duration::from_millis(5))
            .open(Counters::default())
            .expect("Should open config"),
    );

    let setters: Vec<_> = ["stats_a", "stats_b"]
        .into_iter()
        .map(|field| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                for i in 0..50_i64 {
                    config.set(field, i).expect("set should not fail");
                }
            })
        })
        .collect();

    for i in 0..20 {
        file.write_external(&format!(r#"{{"stats": {{"a": {}, "b": {}}}}}"#, 1000 + i, 2000 + i));
        thread::sleep(Duration::from_millis(3));
    }

    for setter in setters {
        setter.join().unwrap();
    }
    config.stop_watcher();

    // Whatever won, the file is a complete document
    let on_disk = Document::parse_as(&file.read(), Format::Json).expect("file must stay parseable");
    assert!(on_disk.root().contains_key("stats"));

    // And an explicit reload agrees with it
    config.load().expect("Should load");
    let snapshot = config.snapshot();
    let stats = config.document();
    assert_eq!(
        stats.get(&"stats.a".into()).and_then(|n| n.as_i64()),
        Some(snapshot.stats_a)
    );
    assert_eq!(
        stats.get(&"stats.b".into()).and_then(|n| n.as_i64()),
        Some(snapshot.stats_b)
    );
}

#[test]
fn test_readers_never_block_forever() {
    let file = TestConfigFile::new("counters.json");
    let config = Arc::new(
        SyncedConfig::builder(file.path())
            .poll_interval(Duration::from_millis(5))
            .open(Counters::default())
            .expect("Should open config"),
    );

    let reader = {
        let config = Arc::clone(&config);
        thread::spawn(move || {
            let mut seen = 0;
            for _ in 0..200 {
                seen = seen.max(config.get_as::<i64>("stats_a").unwrap());
            }
            seen
        })
    };

    for i in 1..=20 {
        config.set("stats_a", i).unwrap();
    }

    let seen = reader.join().unwrap();
    assert!((0..=20).contains(&seen));
    assert_eq!(config.get_as::<i64>("stats_a").unwrap(), 20);
}
