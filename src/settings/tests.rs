//! Unit tests for the settings module.

use super::*;
use proptest::prelude::*;

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_defaults() {
    let settings = PersistedSettings::default();
    assert_eq!(settings.inference, EndpointConfig::new("127.0.0.1", "1234"));
    assert_eq!(settings.transcription, EndpointConfig::new("127.0.0.1", "8080"));
}

#[test]
fn test_load_empty_store_returns_defaults() {
    let store = ConfigStore::in_memory();
    assert_eq!(store.load(), PersistedSettings::default());
}

// ============================================================================
// Lenient parsing
// ============================================================================

#[test]
fn test_partial_record_merges_with_defaults() {
    let settings = PersistedSettings::from_json_lenient(r#"{"lmStudioPort": "4321"}"#);
    assert_eq!(settings.inference.host, "127.0.0.1");
    assert_eq!(settings.inference.port, "4321");
    assert_eq!(settings.transcription, EndpointConfig::new("127.0.0.1", "8080"));
}

#[test]
fn test_corrupt_record_returns_defaults() {
    let settings = PersistedSettings::from_json_lenient("{lmStudioHost: oops");
    assert_eq!(settings, PersistedSettings::default());
}

#[test]
fn test_non_object_record_returns_defaults() {
    for raw in ["null", "[]", "\"text\"", "17"] {
        assert_eq!(
            PersistedSettings::from_json_lenient(raw),
            PersistedSettings::default(),
            "record {raw}"
        );
    }
}

#[test]
fn test_numeric_port_is_kept_as_text() {
    let settings =
        PersistedSettings::from_json_lenient(r#"{"whisperPort": 9000, "whisperHost": "10.0.0.2"}"#);
    assert_eq!(settings.transcription.host, "10.0.0.2");
    assert_eq!(settings.transcription.port, "9000");
}

#[test]
fn test_non_string_field_falls_back_per_field() {
    let settings = PersistedSettings::from_json_lenient(
        r#"{"lmStudioPort": null, "lmStudioHost": true, "whisperPort": ["1"]}"#,
    );
    assert_eq!(settings.inference, EndpointConfig::default_for(EndpointKind::Inference));
    assert_eq!(settings.transcription.port, "8080");
}

#[test]
fn test_unknown_fields_ignored() {
    let settings = PersistedSettings::from_json_lenient(
        r#"{"lmStudioHost": "box", "theme": "dark", "extra": {"a": 1}}"#,
    );
    assert_eq!(settings.inference.host, "box");
}

#[test]
fn test_record_uses_legacy_flat_keys() {
    let mut settings = PersistedSettings::default();
    settings.inference.port = "1235".to_string();

    let value: serde_json::Value = serde_json::from_str(&settings.to_json().unwrap()).unwrap();
    assert_eq!(value["lmStudioHost"], "127.0.0.1");
    assert_eq!(value["lmStudioPort"], "1235");
    assert_eq!(value["whisperHost"], "127.0.0.1");
    assert_eq!(value["whisperPort"], "8080");
}

// ============================================================================
// ConfigStore
// ============================================================================

#[test]
fn test_save_then_load() {
    let store = ConfigStore::in_memory();
    let mut settings = PersistedSettings::default();
    settings.transcription = EndpointConfig::new("whisper.local", "9090");

    store.save(&settings).unwrap();
    assert_eq!(store.load(), settings);
}

#[test]
fn test_clones_share_the_slot() {
    let store = ConfigStore::in_memory();
    let other = store.clone();

    let mut settings = PersistedSettings::default();
    settings.inference.host = "gpu-box".to_string();
    store.save(&settings).unwrap();

    assert_eq!(other.load().inference.host, "gpu-box");
}

#[test]
fn test_empty_strings_are_stored_verbatim() {
    let store = ConfigStore::in_memory();
    let settings = PersistedSettings {
        inference: EndpointConfig::new("", ""),
        transcription: EndpointConfig::new("127.0.0.1", "not-a-port"),
    };
    store.save(&settings).unwrap();
    assert_eq!(store.load(), settings);
}

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }
}

#[test]
fn test_save_failure_is_reported_not_panicking() {
    let store = ConfigStore::new(std::sync::Arc::new(BrokenStore));
    assert!(store.save(&PersistedSettings::default()).is_err());
    assert_eq!(store.load(), PersistedSettings::default());
}

#[test]
fn test_file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = PersistedSettings::default();
    settings.inference.port = "1235".to_string();
    ConfigStore::new(std::sync::Arc::new(FileStore::new(&path)))
        .save(&settings)
        .unwrap();

    let reopened = ConfigStore::new(std::sync::Arc::new(FileStore::new(&path)));
    assert_eq!(reopened.load(), settings);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_garbage_records_load_as_defaults(raw in "[^{]*") {
        // Without a `{` the record can never be a JSON object.
        let backend = MemoryStore::new();
        backend.set(SETTINGS_KEY, &raw).unwrap();
        let store = ConfigStore::new(std::sync::Arc::new(backend));
        prop_assert_eq!(store.load(), PersistedSettings::default());
    }

    #[test]
    fn prop_stored_strings_win(
        lm_host in ".*",
        lm_port in ".*",
        wh_host in ".*",
        wh_port in ".*",
    ) {
        let settings = PersistedSettings {
            inference: EndpointConfig::new(lm_host, lm_port),
            transcription: EndpointConfig::new(wh_host, wh_port),
        };
        let store = ConfigStore::in_memory();
        store.save(&settings).unwrap();
        prop_assert_eq!(store.load(), settings);
    }
}
