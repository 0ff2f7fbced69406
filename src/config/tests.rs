//! Tests for the config module

use super::loader::with_env_overrides;
use super::types::*;
use crate::domain::value_objects::AtomicLayout;
use crate::error::SyncError;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.default, "production");
    assert!(config.remotes.is_empty());
    assert_eq!(config.paths, vec!["app".to_string()]);
    assert!(config.exclude_tables.contains(&"sessions".to_string()));
    assert_eq!(config.exclude_tables.len(), 11);
    assert_eq!(config.timeouts.file_sync, 1800);
    assert_eq!(config.snapshots.keep, 5);
    assert!(config.snapshots.compress);
    assert!(!config.local.is_production());
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
default = "staging"
paths = ["app", "media"]
exclude_paths = ["*.log"]

[remotes.staging]
host = "deploy@staging.example.com"
path = "/var/www/app"
push_allowed = true

[remotes.production]
host = "deploy@example.com"
path = "/var/www/app/current"

[timeouts]
file_sync = 60

[snapshots]
keep = 2
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.default, "staging");
    assert_eq!(config.paths.len(), 2);
    assert_eq!(config.exclude_paths, vec!["*.log".to_string()]);
    assert_eq!(config.timeouts.file_sync(), Duration::from_secs(60));
    assert_eq!(config.timeouts.snapshot_create, 300);
    assert_eq!(config.snapshots.keep, 2);
    assert_eq!(config.snapshots.tool, "php artisan");
    let names: Vec<&str> = config.remotes.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["production", "staging"]);
}

#[test]
fn test_remote_defaults_to_configured_default() {
    let toml = r#"
default = "staging"

[remotes.staging]
host = "deploy@staging.example.com"
path = "/var/www/app"
push_allowed = true
"#;
    let config: Config = toml::from_str(toml).unwrap();

    let remote = config.remote(None).unwrap();
    assert_eq!(remote.name(), "staging");
    assert!(remote.push_allowed());
    assert_eq!(remote.layout(), AtomicLayout::Unknown);
}

#[test]
fn test_remote_current_path_is_atomic_without_layout_lookup() {
    let toml = r#"
[remotes.production]
host = "deploy@example.com"
path = "/var/www/app/current"
"#;
    let config: Config = toml::from_str(toml).unwrap();

    let remote = config.remote(Some("production")).unwrap();
    assert_eq!(remote.layout(), AtomicLayout::Atomic);
    assert_eq!(remote.storage_path(), "/var/www/app/current/storage");
}

#[test]
fn test_unknown_remote_is_rejected() {
    let config = Config::default();
    match config.remote(Some("qa")) {
        Err(SyncError::UnknownRemote { name }) => assert_eq!(name, "qa"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_incomplete_remote_is_rejected() {
    let toml = r#"
[remotes.staging]
host = "deploy@staging.example.com"
"#;
    let config: Config = toml::from_str(toml).unwrap();
    assert!(matches!(
        config.remote(Some("staging")),
        Err(SyncError::IncompleteRemote { .. })
    ));
}

#[test]
fn test_load_with_warnings_reports_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("remote-sync.toml");
    fs::write(
        &path,
        r#"
defualt = "staging"

[snapshots]
kepp = 3
"#,
    )
    .unwrap();

    let (config, warnings) = Config::load_with_warnings(&path).unwrap();
    assert_eq!(config.default, "production");
    assert_eq!(warnings.len(), 2);

    let typo = warnings.iter().find(|w| w.key == "defualt").unwrap();
    assert_eq!(typo.line, Some(2));
    assert_eq!(typo.suggestion.as_deref(), Some("default"));

    let nested = warnings.iter().find(|w| w.key == "kepp").unwrap();
    assert_eq!(nested.suggestion.as_deref(), Some("keep"));
}

#[test]
fn test_load_invalid_toml_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("remote-sync.toml");
    fs::write(&path, "paths = \"not a list\"\n").unwrap();

    assert!(matches!(
        Config::load(&path),
        Err(SyncError::InvalidConfig { .. })
    ));
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(Config::load_or_default(Some(&missing)).is_err());
}

#[test]
fn test_env_overrides_update_existing_remote() {
    let toml = r#"
[remotes.my-staging]
host = "old@example.com"
path = "/srv/app"
"#;
    let config: Config = toml::from_str(toml).unwrap();

    let config = with_env_overrides(
        config,
        env(&[
            ("REMOTE_SYNC_MY_STAGING_HOST", "new@example.com"),
            ("REMOTE_SYNC_DEFAULT", "my-staging"),
            ("UNRELATED", "x"),
        ]),
    );

    assert_eq!(config.default, "my-staging");
    let remote = config.remote(None).unwrap();
    assert_eq!(remote.host(), "new@example.com");
    assert_eq!(remote.base_path(), "/srv/app");
}

#[test]
fn test_env_overrides_create_remote() {
    let config = with_env_overrides(
        Config::default(),
        env(&[
            ("REMOTE_SYNC_PRODUCTION_HOST", "deploy@example.com"),
            ("REMOTE_SYNC_PRODUCTION_PATH", "/var/www/app"),
        ]),
    );

    let remote = config.remote(Some("production")).unwrap();
    assert_eq!(remote.host(), "deploy@example.com");
    assert!(!remote.push_allowed());
}

#[test]
fn test_env_marks_local_environment_production() {
    let config = with_env_overrides(Config::default(), env(&[("REMOTE_SYNC_ENV", "Production")]));
    assert!(config.local.is_production());
}

#[test]
fn test_snapshot_directory_is_under_project_root() {
    let mut config = Config::default();
    config.local.project_root = "/srv/project".into();
    assert_eq!(
        config.snapshot_directory(),
        std::path::PathBuf::from("/srv/project/storage/snapshots")
    );
    assert_eq!(
        config.local.storage_root(),
        std::path::PathBuf::from("/srv/project/storage")
    );
}
