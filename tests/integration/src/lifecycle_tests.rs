//! End-to-end lifecycle scenarios
//!
//! Each test drives a config the way an application would: open at
//! startup, change values at runtime, and live through hand edits of the
//! file by someone else.

use std::time::Duration;

use cfgsync_core::{FieldType, LoadTrigger, ReloadEvent, SyncedConfig};
use cfgsync_document::{DocPath, Document, DocumentNode, Format};
use cfgsync_test_utils::{TestConfigFile, wait_until};
use predicates::prelude::*;
use pretty_assertions::assert_eq;

const POLL: Duration = Duration::from_millis(50);
const SETTLE: Duration = Duration::from_secs(5);

cfgsync_core::config_fields! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct ChatConfig {
        /// Message of the day
        pub motd: String = "Welcome!".to_string(),
        #[category("limits")]
        pub limits_max_players: i32 = 20,
        #[category("limits")]
        pub limits_message_bytes: i64 = 4096,
        #[category("moderation")]
        pub moderation_banned_words: Vec<String> = Vec::new(),
        #[category("moderation")]
        pub moderation_enabled: bool = true,
    }
}

fn open(file: &TestConfigFile) -> SyncedConfig<ChatConfig> {
    SyncedConfig::builder(file.path())
        .poll_interval(POLL)
        .open(ChatConfig::default())
        .expect("Should open config")
}

// =============================================================================
// Startup
// =============================================================================

#[test]
fn test_first_run_writes_categorized_defaults() {
    let file = TestConfigFile::nested("chat.json");
    let _config = open(&file);

    let content = file.read();
    let layout = predicate::str::contains("\"limits\": {")
        .and(predicate::str::contains("\"max_players\": 20"))
        .and(predicate::str::contains("\"moderation\": {"))
        .and(predicate::str::contains("\"banned_words\": []"))
        .and(predicate::str::contains("\"enabled\": true"));
    assert!(layout.eval(&content), "unexpected layout:\n{content}");

    let motd = content.find("\"motd\"").unwrap();
    let limits = content.find("\"limits\"").unwrap();
    let moderation = content.find("\"moderation\"").unwrap();
    assert!(motd < limits && limits < moderation, "keys out of declaration order");
}

#[test]
fn test_second_run_keeps_user_values() {
    let file = TestConfigFile::new("chat.json");
    {
        let config = open(&file);
        config.set("limits_max_players", 64).unwrap();
        config.set("moderation_banned_words", vec!["spam".to_string()]).unwrap();
    }

    let config = open(&file);
    let host = config.snapshot();
    assert_eq!(host.limits_max_players, 64);
    assert_eq!(host.moderation_banned_words, vec!["spam".to_string()]);
}

// =============================================================================
// Runtime edits
// =============================================================================

#[test]
fn test_hand_edit_with_missing_key_is_healed() {
    let file = TestConfigFile::new("chat.json");
    let config = open(&file);
    let events = config.subscribe();

    // Someone deletes the whole moderation block and lowers the player cap
    file.write_external(r#"{"motd": "Edited", "limits": {"max_players": 5, "message_bytes": 10}}"#);

    let report = loop {
        match events.recv_timeout(SETTLE).expect("watcher should reload") {
            ReloadEvent::Loaded {
                trigger: LoadTrigger::Watcher,
                report,
            } => break report,
            _ => continue,
        }
    };
    assert_eq!(
        report.healed,
        vec!["moderation_banned_words".to_string(), "moderation_enabled".to_string()]
    );
    assert_eq!(config.get_as::<String>("motd").unwrap(), "Edited");
    assert_eq!(config.get_as::<i32>("limits_max_players").unwrap(), 5);

    // The next write-through carries the healed block to disk
    config.set("motd", "Saved").unwrap();
    let saved = file.read_json();
    assert_eq!(saved["moderation"]["enabled"], serde_json::json!(true));
    assert_eq!(saved["limits"]["max_players"], serde_json::json!(5));
}

#[test]
fn test_two_instances_share_one_file() {
    let file = TestConfigFile::new("chat.json");
    let writer = open(&file);
    let reader = open(&file);

    writer.set("motd", "from writer").unwrap();

    // Same content, but a modification time the reader cannot have seen on a coarse clock
    let content = file.read();
    file.write_external(&content);

    assert!(wait_until(SETTLE, || {
        reader.get_as::<String>("motd").unwrap() == "from writer"
    }));
}

#[test]
fn test_yaml_storage_end_to_end() {
    let file = TestConfigFile::new("chat.yml");
    let config = open(&file);
    assert_eq!(config.format(), Format::Yaml);

    file.write_external(
        "motd: hi\nlimits:\n  max_players: 7\n  message_bytes: 1\nmoderation:\n  enabled: false\n  banned_words:\n    - foo\n    - 12\n",
    );
    assert!(wait_until(SETTLE, || {
        config.with_host(|h| h.limits_max_players) == 7
    }));

    let host = config.snapshot();
    assert!(!host.moderation_enabled);
    // Non-string elements are dropped
    assert_eq!(host.moderation_banned_words, vec!["foo".to_string()]);

    let parsed = Document::parse_as(&file.read(), Format::Yaml).unwrap();
    assert_eq!(
        parsed.get(&DocPath::parse("limits.max_players")),
        Some(&DocumentNode::Int(7))
    );
}

#[test]
fn test_list_fields_by_type() {
    let file = TestConfigFile::new("chat.json");
    let config = open(&file);

    assert_eq!(
        config.list_fields(Some(FieldType::INT64)),
        vec!["limits_message_bytes".to_string()]
    );
    let lists: Vec<_> = config
        .list_fields(None)
        .into_iter()
        .filter(|name| config.schema().get(name).unwrap().field_type().is_list())
        .collect();
    assert_eq!(lists, vec!["moderation_banned_words".to_string()]);
}
