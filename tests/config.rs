use stitchlog::config::Config;
use stitchlog::repositories::ProjectSort;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.server.bind_addr, "127.0.0.1:5000");
    assert_eq!(config.server.max_upload_bytes, 16 * 1024 * 1024);
    assert_eq!(config.storage.database_url, "sqlite://crochet.db?mode=rwc");
    assert_eq!(config.display.default_sort, "newest");
    assert!(config.logging.enabled);
    assert_eq!(config.logging.file, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    config.server.bind_addr = "localhost".to_string();
    assert!(config.validate().is_err());

    config = Config::default();
    config.server.max_upload_bytes = 10;
    assert!(config.validate().is_err());

    config = Config::default();
    config.storage.database_url = "postgres://localhost/crochet".to_string();
    assert!(config.validate().is_err());

    config = Config::default();
    config.display.default_sort = "popular".to_string();
    assert!(config.validate().is_err());

    config = Config::default();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    config = Config::default();
    config.storage.upload_dir = "".into();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("bind_addr = \"127.0.0.1:5000\""));
    assert!(toml_str.contains("default_sort = \"newest\""));
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML configs merge with defaults
    let partial_toml = r#"
[server]
bind_addr = "0.0.0.0:8000"

[display]
default_sort = "title_asc"
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    assert_eq!(config.server.bind_addr, "0.0.0.0:8000");
    assert_eq!(config.default_sort(), ProjectSort::TitleAsc);

    assert_eq!(config.server.max_upload_bytes, 16 * 1024 * 1024);
    assert_eq!(config.storage.upload_dir, std::path::PathBuf::from("static/uploads"));
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.server.bind_addr, default_config.server.bind_addr);
    assert_eq!(config.storage.database_url, default_config.storage.database_url);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
    assert_eq!(config.display.default_sort, default_config.display.default_sort);
}

#[test]
fn test_generate_and_load_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    Config::generate_default_config(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# stitchlog configuration file"));

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.server.bind_addr, Config::default().server.bind_addr);
}

#[test]
fn test_load_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stitchlog.toml");

    std::fs::write(&path, "[server]\nmax_upload_bytes = 1\n").unwrap();
    assert!(Config::load_from_file(&path).is_err());

    std::fs::write(&path, "this is not toml").unwrap();
    assert!(Config::load_from_file(&path).is_err());

    assert!(Config::load_from_file(dir.path().join("missing.toml")).is_err());
}
