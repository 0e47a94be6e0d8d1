//! Integration tests for configuration file loading.

use hoist_config::{ConfigError, ConfigurationLoader, FileConfigurationLoader};
use std::fs;
use tempfile::TempDir;

#[test]
fn loads_well_formed_document() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hoist.json");
    fs::write(
        &path,
        r#"{
            "sourceRoot": "src",
            "compilerOptions": {
                "tsConfigPath": "tsconfig.build.json",
                "deleteOutDir": true
            },
            "projects": {
                "api": { "sourceRoot": "apps/api/src" }
            }
        }"#,
    )
    .unwrap();

    let config = FileConfigurationLoader
        .load(path.to_str().unwrap())
        .unwrap();
    assert_eq!(
        config.compiler_options.ts_config_path.as_deref(),
        Some("tsconfig.build.json")
    );
    assert_eq!(config.source_root_for("api"), "apps/api/src");
}

#[test]
fn missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.json");

    let err = FileConfigurationLoader
        .load(path.to_str().unwrap())
        .unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn malformed_json_is_invalid() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hoist.json");
    fs::write(&path, "{ not json").unwrap();

    let err = FileConfigurationLoader
        .load(path.to_str().unwrap())
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn empty_document_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hoist.json");
    fs::write(&path, "{}").unwrap();

    let config = FileConfigurationLoader
        .load(path.to_str().unwrap())
        .unwrap();
    assert!(config.compiler_options.ts_config_path.is_none());
    assert!(config.projects.is_empty());
    assert_eq!(config.source_root_for("api"), "src");
}
