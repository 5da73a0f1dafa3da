use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use prmon::util::config::AppConfig;

fn write_config(toml: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();
    f
}

#[test]
fn test_load_full_config() {
    let f = write_config(
        r#"
[api]
base_url = "https://monitor.example.com/api/v1/monitor_router/"
artifact_base_url = "https://files.example.com/"

[download]
dir = "/tmp/screens"
open_after_save = true
max_concurrent = 2

[ui]
tick_rate_ms = 250
"#,
    );

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert_eq!(
        config.api.base_url,
        "https://monitor.example.com/api/v1/monitor_router/"
    );
    assert_eq!(
        config.api.artifact_base_url.as_deref(),
        Some("https://files.example.com/")
    );
    assert_eq!(config.download.dir, Some(PathBuf::from("/tmp/screens")));
    assert!(config.download.open_after_save);
    assert_eq!(config.download.max_concurrent, 2);
    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.download_dir(), PathBuf::from("/tmp/screens"));
}

#[test]
fn test_load_partial_config_uses_defaults() {
    let f = write_config(
        r#"
[api]
base_url = "http://10.0.0.5:8000/api/v1/monitor_router/"
"#,
    );

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert_eq!(
        config.api.base_url,
        "http://10.0.0.5:8000/api/v1/monitor_router/"
    );
    assert!(config.api.artifact_base_url.is_none());
    assert!(config.download.dir.is_none());
    assert!(!config.download.open_after_save);
    assert_eq!(config.download.max_concurrent, 4);
    assert_eq!(config.ui.tick_rate_ms, 120);
}

#[test]
fn test_load_empty_config_uses_all_defaults() {
    let f = write_config("");
    let config = AppConfig::load(Some(f.path())).unwrap();
    assert_eq!(
        config.api.base_url,
        "http://localhost:8000/api/v1/monitor_router/"
    );
    assert_eq!(config.download.max_concurrent, 4);
}

#[test]
fn test_load_nonexistent_file_fails() {
    let result = AppConfig::load(Some(std::path::Path::new("/nonexistent/path/config.toml")));
    assert!(result.is_err());
}

#[test]
fn test_load_invalid_toml_fails() {
    let f = write_config("this is not [valid toml {{");
    assert!(AppConfig::load(Some(f.path())).is_err());
}

#[test]
fn test_wrong_type_fails() {
    let f = write_config("[download]\nmax_concurrent = \"many\"\n");
    assert!(AppConfig::load(Some(f.path())).is_err());
}

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert_eq!(
        config.api.base_url,
        "http://localhost:8000/api/v1/monitor_router/"
    );
    assert!(config.api.artifact_base_url.is_none());
    assert!(config.download.dir.is_none());
    assert!(!config.download.open_after_save);
    assert_eq!(config.ui.tick_rate_ms, 120);
}
