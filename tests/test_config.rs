use std::path::PathBuf;
use std::time::Duration;
use verbfs::config::{Config, LISTEN_ENV, ROOT_ENV};

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server.workers, 10);
    assert_eq!(cfg.ready_timeout(), Duration::from_millis(500));
    assert_eq!(cfg.files.root, PathBuf::from("."));
    assert!(cfg.allowed_mime_types().contains("text/html"));
    assert!(cfg.allowed_mime_types().contains("text/plain"));
    assert_eq!(cfg.allowed_mime_types().len(), 2);
    assert_eq!(cfg.image_base().unwrap().as_str(), "https://http.cat/");
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml_str(
        r#"
server:
  listen_addr: "0.0.0.0:3000"
  workers: 4
files:
  root: /srv
  allowed_mime_types: [text/plain]
"#,
    )
    .unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.server.workers, 4);
    // Unset fields keep their defaults
    assert_eq!(cfg.server.ready_timeout_ms, 500);
    assert_eq!(cfg.files.root, PathBuf::from("/srv"));
    assert!(!cfg.allowed_mime_types().contains("text/html"));
    assert_eq!(cfg.error_page.image_base, "https://http.cat/");
}

#[test]
fn test_config_empty_yaml_is_default() {
    let cfg = Config::from_yaml_str("{}").unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
}

#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("verbfs-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "server:\n  workers: 2\n").unwrap();

    let cfg = Config::from_file(&path).unwrap();
    assert_eq!(cfg.server.workers, 2);

    std::fs::remove_file(&path).unwrap();
    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_config_validation() {
    let mut cfg = Config::default();
    cfg.server.workers = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.files.allowed_mime_types.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.error_page.image_base = "not a url".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_env_overrides() {
    // Single test touches the environment so parallel tests do not race.
    unsafe {
        std::env::remove_var("VERBFS_CONFIG");
        std::env::set_var(LISTEN_ENV, "0.0.0.0:5000");
        std::env::set_var(ROOT_ENV, "/var/www");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:5000");
    assert_eq!(cfg.files.root, PathBuf::from("/var/www"));

    unsafe {
        std::env::remove_var(LISTEN_ENV);
        std::env::remove_var(ROOT_ENV);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
}
