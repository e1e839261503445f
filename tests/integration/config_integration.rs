//! Integration tests for settings loading

use netprotect::config::{ConfigLoader, DEFAULT_API_BASE_URL};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_workspace_config_file_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        r#"
[api]
base_url = "https://netprotect.example.com/api/v1"
request_timeout_secs = 12

[editor]
domain_section = "[corp.example]"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    if std::env::var("NETPROTECT_API_URL").is_err() {
        assert_eq!(config.api.base_url, "https://netprotect.example.com/api/v1");
    }
    assert_eq!(config.api.request_timeout_secs, 12);
    assert_eq!(config.api.connect_timeout_secs, 10);
    assert_eq!(config.editor.domain_section, "[corp.example]");
    assert!(config.editor.policy().is_section_name_editable("[corp.example]"));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_explicit_file_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("netprotect.toml");
    fs::write(&config_file, "[api]\nsession_cookie = \"sid=secret-value\"\n").unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    if std::env::var("NETPROTECT_API_URL").is_err() {
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    }
    assert_eq!(config.api.session_cookie.as_deref(), Some("sid=secret-value"));

    let shown = config.to_display_toml().unwrap();
    assert!(!shown.contains("secret-value"));
}

#[test]
fn test_invalid_domain_section_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("netprotect.toml");
    fs::write(&config_file, "[editor]\ndomain_section = \"adlab.local\"\n").unwrap();

    assert!(ConfigLoader::load_from_file(&config_file).is_err());
}
