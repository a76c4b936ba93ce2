//! Configuration tests

use folio::config::{ConfigError, MAIL_API_KEY_ENV, SiteConfig};
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn test_missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let config = SiteConfig::load_from(&temp.path().join("absent.toml")).unwrap();

    assert_eq!(config, SiteConfig::default());
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.bind, "127.0.0.1");
    assert!(config.admin.account().is_none());
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[server]
port = 9000

[admin]
email = "admin@example.com"
password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"
"#,
    )
    .unwrap();

    let config = SiteConfig::load_from(&path).unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.bind, "127.0.0.1");
    assert_eq!(config.admin.account().unwrap().email, "admin@example.com");
    assert!(!config.storage.watch);
}

#[test]
fn test_malformed_file_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[server]\nport = \"eighty\"\n").unwrap();

    assert!(matches!(SiteConfig::load_from(&path), Err(ConfigError::Parse { .. })));
}

#[test]
fn test_save_then_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");
    let mut config = SiteConfig::default();
    config.storage.data_dir = Some(temp.path().join("data"));
    config.contact.service_id = "service_x".to_string();

    config.save_to(&path).unwrap();
    assert_eq!(SiteConfig::load_from(&path).unwrap(), config);
}

#[test]
fn test_debug_hides_secrets() {
    let mut config = SiteConfig::default();
    config.admin.password_hash = "$argon2id$secret".to_string();
    config.contact.api_key = "key-123".to_string();

    let debug = format!("{config:?}");
    assert!(!debug.contains("$argon2id$secret"));
    assert!(!debug.contains("key-123"));
}

#[test]
#[serial(env)]
fn test_env_overrides_api_key() {
    let mut config = SiteConfig::default();
    config.contact.api_key = "from-file".to_string();

    // SAFETY: serialized with the other env-touching tests
    unsafe { std::env::set_var(MAIL_API_KEY_ENV, "from-env") };
    let settings = config.contact.settings();
    unsafe { std::env::remove_var(MAIL_API_KEY_ENV) };

    assert_eq!(settings.api_key, "from-env");
}

#[test]
#[serial(env)]
fn test_empty_env_does_not_override() {
    let mut config = SiteConfig::default();
    config.contact.api_key = "from-file".to_string();

    // SAFETY: serialized with the other env-touching tests
    unsafe { std::env::set_var(MAIL_API_KEY_ENV, "") };
    let settings = config.contact.settings();
    unsafe { std::env::remove_var(MAIL_API_KEY_ENV) };

    assert_eq!(settings.api_key, "from-file");
}
