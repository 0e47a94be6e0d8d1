//! Bundler configuration factories.
//!
//! A bundler run can be customized by a user-authored options document
//! loaded from the workspace. The loader has a narrow, fallible contract;
//! whether a missing document is fatal is decided by the orchestrator, not
//! here; see [`crate::BuildOrchestrator`] for the explicit-versus-default
//! path policy.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("bundler configuration not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid bundler configuration {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("I/O error reading bundler configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// A transform from base bundler options to final bundler options.
///
/// `Identity` is substituted when no document exists at the implicit default
/// path: applying it returns the base unchanged. A loaded `Document` is
/// shallow-merged over the base, user keys winning.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigFactory {
    Identity,
    Document(Value),
}

impl ConfigFactory {
    pub fn apply(&self, base: Value) -> Value {
        match self {
            ConfigFactory::Identity => base,
            ConfigFactory::Document(overrides) => merge(base, overrides.clone()),
        }
    }
}

fn merge(base: Value, overrides: Value) -> Value {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            let mut merged: Map<String, Value> = base;
            for (key, value) in overrides {
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        // A non-object override replaces the base wholesale.
        (_, overrides) => overrides,
    }
}

/// Loads an executable-configuration document from a filesystem path.
#[async_trait]
pub trait FileModuleLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<ConfigFactory, FactoryError>;
}

/// JSON-document loader used by the CLI.
#[derive(Debug, Clone, Default)]
pub struct JsonModuleLoader;

#[async_trait]
impl FileModuleLoader for JsonModuleLoader {
    async fn load(&self, path: &Path) -> Result<ConfigFactory, FactoryError> {
        if !path.exists() {
            return Err(FactoryError::NotFound(path.to_path_buf()));
        }
        let text = tokio::fs::read_to_string(path).await?;
        let document = serde_json::from_str(&text).map_err(|e| FactoryError::Invalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(ConfigFactory::Document(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn identity_returns_base_unchanged() {
        let base = json!({ "mode": "production", "entry": "src/main.ts" });
        assert_eq!(ConfigFactory::Identity.apply(base.clone()), base);
    }

    #[test]
    fn document_overrides_win_shallowly() {
        let factory = ConfigFactory::Document(json!({ "mode": "development" }));
        let merged = factory.apply(json!({ "mode": "production", "entry": "src/main.ts" }));
        assert_eq!(
            merged,
            json!({ "mode": "development", "entry": "src/main.ts" })
        );
    }

    #[tokio::test]
    async fn loads_document_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("webpack.config.json");
        fs::write(&path, r#"{ "devtool": "source-map" }"#).unwrap();

        let factory = JsonModuleLoader.load(&path).await.unwrap();
        assert_eq!(
            factory,
            ConfigFactory::Document(json!({ "devtool": "source-map" }))
        );
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = JsonModuleLoader
            .load(&temp.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, FactoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_document_is_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("webpack.config.json");
        fs::write(&path, "module.exports = {}").unwrap();

        let err = JsonModuleLoader.load(&path).await.unwrap_err();
        assert!(matches!(err, FactoryError::Invalid { .. }));
    }
}
