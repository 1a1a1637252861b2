#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `FilePreferenceStore` and `AppConfig`.

use std::path::Path;

use tor_settings_app::adapters::FilePreferenceStore;
use tor_settings_app::config::AppConfig;
use tor_settings_core::error::CoreError;
use tor_settings_core::traits::{
    BridgeSettingsStore, FirewallSettingsStore, ProtocolService, ProxySettingsStore,
};
use tor_settings_core::types::{BridgeConfiguration, FirewallConfiguration, ProxyConfiguration};

fn open(path: &Path) -> FilePreferenceStore {
    FilePreferenceStore::open(path, vec!["obfs4".to_string()])
}

#[test]
fn test_missing_file_reads_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let store = open(&tmp.path().join("prefs.json"));

    assert_eq!(BridgeSettingsStore::read(&store), BridgeConfiguration::None);
    assert_eq!(ProxySettingsStore::read(&store), ProxyConfiguration::None);
    assert_eq!(FirewallSettingsStore::read(&store), FirewallConfiguration::None);
    assert_eq!(store.default_bridge_types(), vec!["obfs4"]);
    assert!(!store.is_dirty());
}

#[test]
fn test_writes_are_not_on_disk_until_flushed() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    let store = open(&path);

    BridgeSettingsStore::write(&store, &BridgeConfiguration::builtin("obfs4")).unwrap();
    assert!(store.is_dirty());
    assert!(!path.exists());

    store.flush_settings().unwrap();
    assert!(path.exists());
    assert!(!store.is_dirty());
}

#[test]
fn test_flush_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    let store = open(&path);

    let bridges = BridgeConfiguration::user_provided(vec![
        "obfs4 192.0.2.1:443 AAAA".to_string(),
        "obfs4 192.0.2.2:443 BBBB".to_string(),
    ]);
    let proxy = ProxyConfiguration::https("proxy.example", 8443, "alice", "p@ss word");
    let firewall = FirewallConfiguration::custom([80, 443]);

    BridgeSettingsStore::write(&store, &bridges).unwrap();
    ProxySettingsStore::write(&store, &proxy).unwrap();
    FirewallSettingsStore::write(&store, &firewall).unwrap();
    store.flush_settings().unwrap();

    let reopened = open(&path);
    assert_eq!(BridgeSettingsStore::read(&reopened), bridges);
    assert_eq!(ProxySettingsStore::read(&reopened), proxy);
    assert_eq!(FirewallSettingsStore::read(&reopened), firewall);
}

#[test]
fn test_flush_without_changes_does_not_create_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    let store = open(&path);

    store.flush_settings().unwrap();

    assert!(!path.exists());
}

#[test]
fn test_flush_creates_parent_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("profile").join("tor").join("prefs.json");
    let store = open(&path);

    FirewallSettingsStore::write(&store, &FirewallConfiguration::custom([8080])).unwrap();
    store.flush_settings().unwrap();

    assert!(path.exists());
    assert!(!tmp.path().join("profile/tor/prefs.json.tmp").exists());
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = open(&path);

    assert_eq!(BridgeSettingsStore::read(&store), BridgeConfiguration::None);
    assert_eq!(ProxySettingsStore::read(&store), ProxyConfiguration::None);
}

#[test]
fn test_invalid_stored_values_collapse_to_none() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    std::fs::write(
        &path,
        r#"{
            "bridges": { "source": "userProvided", "bridgeLines": [] },
            "proxy": { "type": "socks5", "host": "", "port": 1080 },
            "firewall": { "policy": "custom", "allowedPorts": [0] }
        }"#,
    )
    .unwrap();

    let store = open(&path);

    assert_eq!(BridgeSettingsStore::read(&store), BridgeConfiguration::None);
    assert_eq!(ProxySettingsStore::read(&store), ProxyConfiguration::None);
    assert_eq!(FirewallSettingsStore::read(&store), FirewallConfiguration::None);
}

#[test]
fn test_one_bad_domain_keeps_the_others() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    std::fs::write(
        &path,
        r#"{
            "bridges": { "source": "userProvided", "bridgeLines": ["obfs4 192.0.2.1:443 AAAA"] },
            "proxy": { "type": "socks5", "host": "127.0.0.1", "port": 70000 },
            "firewall": { "policy": "custom", "allowedPorts": [443] }
        }"#,
    )
    .unwrap();

    let store = open(&path);
    let bridges =
        BridgeConfiguration::user_provided(vec!["obfs4 192.0.2.1:443 AAAA".to_string()]);

    assert_eq!(BridgeSettingsStore::read(&store), bridges);
    assert_eq!(ProxySettingsStore::read(&store), ProxyConfiguration::None);
    assert_eq!(
        FirewallSettingsStore::read(&store),
        FirewallConfiguration::custom([443])
    );

    // A later flush must not lose the domains that loaded fine
    ProxySettingsStore::write(&store, &ProxyConfiguration::socks4("127.0.0.1", 9050)).unwrap();
    store.flush_settings().unwrap();

    let reopened = open(&path);
    assert_eq!(BridgeSettingsStore::read(&reopened), bridges);
    assert_eq!(
        FirewallSettingsStore::read(&reopened),
        FirewallConfiguration::custom([443])
    );
    assert_eq!(
        ProxySettingsStore::read(&reopened),
        ProxyConfiguration::socks4("127.0.0.1", 9050)
    );
}

#[test]
fn test_unknown_tag_resets_only_that_domain() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    std::fs::write(
        &path,
        r#"{
            "bridges": { "source": "moat" },
            "firewall": { "policy": "custom", "allowedPorts": [80] }
        }"#,
    )
    .unwrap();

    let store = open(&path);

    assert_eq!(BridgeSettingsStore::read(&store), BridgeConfiguration::None);
    assert_eq!(
        FirewallSettingsStore::read(&store),
        FirewallConfiguration::custom([80])
    );
}

#[test]
fn test_non_object_document_falls_back_to_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let store = open(&path);

    assert_eq!(FirewallSettingsStore::read(&store), FirewallConfiguration::None);
}

#[test]
fn test_tor_logs_read_from_log_file() {
    let tmp = tempfile::tempdir().unwrap();
    let log_path = tmp.path().join("tor.log");
    let store = open(&tmp.path().join("prefs.json")).with_tor_log_path(&log_path);

    assert_eq!(store.tor_logs().unwrap(), "");

    std::fs::write(&log_path, "[notice] Bootstrapped 100% (done): Done\n").unwrap();
    assert_eq!(
        store.tor_logs().unwrap(),
        "[notice] Bootstrapped 100% (done): Done\n"
    );
}

#[test]
fn test_tor_logs_empty_without_log_path() {
    let tmp = tempfile::tempdir().unwrap();
    let store = open(&tmp.path().join("prefs.json"));

    assert_eq!(store.tor_logs().unwrap(), "");
}

#[test]
fn test_partial_document_keeps_other_domains_default() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    std::fs::write(
        &path,
        r#"{ "firewall": { "policy": "custom", "allowedPorts": [443, 80] } }"#,
    )
    .unwrap();

    let store = open(&path);

    assert_eq!(
        FirewallSettingsStore::read(&store),
        FirewallConfiguration::custom([443, 80])
    );
    assert_eq!(BridgeSettingsStore::read(&store), BridgeConfiguration::None);
}

#[test]
fn test_from_config_respects_daemon_ownership() {
    let tmp = tempfile::tempdir().unwrap();
    let config = AppConfig {
        preferences_path: tmp.path().join("prefs.json"),
        owns_tor_daemon: false,
        ..AppConfig::default()
    };

    let store = FilePreferenceStore::from_config(&config);

    assert!(!store.owns_tor_daemon());
    assert_eq!(store.path(), config.preferences_path.as_path());
}

// ===== AppConfig =====

#[test]
fn test_config_missing_file_uses_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let config = AppConfig::load(&tmp.path().join("config.json")).unwrap();

    assert_eq!(config, AppConfig::default());
    assert!(config.owns_tor_daemon);
    assert_eq!(config.builtin_bridge_types.len(), 3);
}

#[test]
fn test_config_save_and_load() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.json");
    let config = AppConfig {
        builtin_bridge_types: vec!["snowflake".to_string()],
        bridge_request_timeout_secs: 15,
        ..AppConfig::default()
    };

    config.save(&path).unwrap();
    let loaded = AppConfig::load(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_config_partial_file_fills_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.json");
    std::fs::write(&path, r#"{ "ownsTorDaemon": false }"#).unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert!(!config.owns_tor_daemon);
    assert_eq!(
        config.builtin_bridge_types,
        AppConfig::default().builtin_bridge_types
    );
}

#[test]
fn test_config_rejects_invalid_values() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.json");

    std::fs::write(&path, r#"{ "bridgeRequestTimeoutSecs": 0 }"#).unwrap();
    assert!(matches!(
        AppConfig::load(&path),
        Err(CoreError::ValidationError(_))
    ));

    std::fs::write(&path, r#"{ "builtinBridgeTypes": ["obfs4", " "] }"#).unwrap();
    assert!(matches!(
        AppConfig::load(&path),
        Err(CoreError::ValidationError(_))
    ));

    std::fs::write(&path, r#"{ "builtinBridgeTypes": [] }"#).unwrap();
    assert!(matches!(
        AppConfig::load(&path),
        Err(CoreError::ValidationError(_))
    ));

    std::fs::write(&path, "[]").unwrap();
    assert!(matches!(
        AppConfig::load(&path),
        Err(CoreError::SerializationError(_))
    ));

    std::fs::write(&path, "\"obfs4\"").unwrap();
    assert!(matches!(
        AppConfig::load(&path),
        Err(CoreError::SerializationError(_))
    ));
}

#[test]
fn test_config_tor_log_path_reaches_store() {
    let tmp = tempfile::tempdir().unwrap();
    let log_path = tmp.path().join("tor.log");
    std::fs::write(&log_path, "[warn] Problem bootstrapping").unwrap();
    let config = AppConfig {
        preferences_path: tmp.path().join("prefs.json"),
        tor_log_path: Some(log_path),
        ..AppConfig::default()
    };

    let store = FilePreferenceStore::from_config(&config);

    assert_eq!(store.tor_logs().unwrap(), "[warn] Problem bootstrapping");
}
