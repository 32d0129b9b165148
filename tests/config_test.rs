//! Settings file tests

use simmer_toads::config::{Config, DEFAULT_BASE_URL};
use simmer_toads::error::SimmerError;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.request_timeout(), Duration::from_secs(120));
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_base_url("https://toads.example/api/").unwrap();
    config.set_session_cookie(Some("session=xyz".to_string()));
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.session_cookie.as_deref(), Some("session=xyz"));
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"timeout_seconds": 30}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert!(config.session_cookie.is_none());
}

#[test]
fn test_broken_file_is_json_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Config::load_from(&path), Err(SimmerError::JsonParse(_))));
}

#[test]
fn test_invalid_base_url_rejected() {
    let mut config = Config::default();

    assert!(matches!(config.set_base_url("not a url"), Err(SimmerError::InvalidUrl(_))));
    assert!(matches!(
        config.set_base_url("ftp://toads.example/"),
        Err(SimmerError::InvalidUrl(_))
    ));
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_blank_session_is_cleared() {
    let mut config = Config::default();
    config.set_session_cookie(Some("session=1".into()));
    config.set_session_cookie(Some("   ".into()));
    assert!(config.session_cookie.is_none());
}
