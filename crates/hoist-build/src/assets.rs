//! Non-source asset copying.
//!
//! Assets are declared under `compilerOptions.assets` as glob patterns
//! (optionally with an exclusion and a target subdirectory) and are copied
//! from the application's source root into the output directory before any
//! strategy runs. A per-application assets list replaces the global one.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ignore::{Match, WalkBuilder, overrides::OverrideBuilder};
use thiserror::Error;
use tracing::debug;

use hoist_config::{AssetSpec, Configuration};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid asset pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    #[error("asset walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error copying assets: {0}")]
    Io(#[from] std::io::Error),

    #[error("asset copy task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Copies configured assets into the output directory.
#[async_trait]
pub trait AssetsManager: Send + Sync {
    async fn copy_assets(
        &self,
        configuration: &Configuration,
        app_name: &str,
        out_dir: &Path,
    ) -> Result<(), AssetError>;
}

/// Filesystem-backed assets manager rooted at the workspace directory.
#[derive(Debug, Clone)]
pub struct WorkspaceAssets {
    root: PathBuf,
}

impl WorkspaceAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for WorkspaceAssets {
    fn default() -> Self {
        Self::new(".")
    }
}

#[async_trait]
impl AssetsManager for WorkspaceAssets {
    async fn copy_assets(
        &self,
        configuration: &Configuration,
        app_name: &str,
        out_dir: &Path,
    ) -> Result<(), AssetError> {
        let specs = effective_specs(configuration, app_name);
        if specs.is_empty() {
            return Ok(());
        }

        let source_root = self.root.join(configuration.source_root_for(app_name));
        let out_dir = out_dir.to_path_buf();

        // The walk is synchronous filesystem work; keep it off the runtime.
        tokio::task::spawn_blocking(move || {
            for spec in specs {
                copy_one(&source_root, &out_dir, &spec)?;
            }
            Ok(())
        })
        .await?
    }
}

fn effective_specs(configuration: &Configuration, app_name: &str) -> Vec<AssetSpec> {
    configuration
        .override_for(app_name, "compilerOptions.assets")
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_else(|| configuration.compiler_options.assets.clone())
}

fn copy_one(source_root: &Path, out_dir: &Path, spec: &AssetSpec) -> Result<(), AssetError> {
    let (include, exclude, target) = match spec {
        AssetSpec::Pattern(pattern) => (pattern.as_str(), None, None),
        AssetSpec::Detailed {
            include,
            exclude,
            out_dir,
        } => (include.as_str(), exclude.as_deref(), out_dir.as_deref()),
    };

    if !source_root.exists() {
        debug!(root = %source_root.display(), "asset source root missing, skipping");
        return Ok(());
    }

    let mut overrides = OverrideBuilder::new(source_root);
    overrides
        .add(include)
        .map_err(|source| AssetError::Pattern {
            pattern: include.to_string(),
            source,
        })?;
    if let Some(exclude) = exclude {
        overrides
            .add(&format!("!{exclude}"))
            .map_err(|source| AssetError::Pattern {
                pattern: exclude.to_string(),
                source,
            })?;
    }
    let matcher = overrides.build().map_err(|source| AssetError::Pattern {
        pattern: include.to_string(),
        source,
    })?;

    let destination_root = match target {
        Some(subdir) => out_dir.join(subdir),
        None => out_dir.to_path_buf(),
    };

    for entry in WalkBuilder::new(source_root).standard_filters(false).build() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if !matches!(matcher.matched(path, false), Match::Whitelist(_)) {
            continue;
        }
        let Ok(relative) = path.strip_prefix(source_root) else {
            continue;
        };
        let destination = destination_root.join(relative);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!(from = %path.display(), to = %destination.display(), "copying asset");
        fs::copy(path, &destination)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn copies_matching_patterns() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/mail/welcome.hbs", "hello");
        write(temp.path(), "src/main.ts", "code");
        let out = temp.path().join("dist");

        let config = Configuration::from_value(json!({
            "compilerOptions": { "assets": ["**/*.hbs"] }
        }))
        .unwrap();

        WorkspaceAssets::new(temp.path())
            .copy_assets(&config, "api", &out)
            .await
            .unwrap();

        assert!(out.join("mail/welcome.hbs").exists());
        assert!(!out.join("main.ts").exists());
    }

    #[tokio::test]
    async fn detailed_spec_honors_exclude_and_out_dir() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/templates/a.hbs", "a");
        write(temp.path(), "src/templates/draft.hbs", "d");
        let out = temp.path().join("dist");

        let config = Configuration::from_value(json!({
            "compilerOptions": {
                "assets": [{
                    "include": "templates/**/*.hbs",
                    "exclude": "templates/draft.hbs",
                    "outDir": "views"
                }]
            }
        }))
        .unwrap();

        WorkspaceAssets::new(temp.path())
            .copy_assets(&config, "api", &out)
            .await
            .unwrap();

        assert!(out.join("views/templates/a.hbs").exists());
        assert!(!out.join("views/templates/draft.hbs").exists());
    }

    #[tokio::test]
    async fn app_override_replaces_global_list() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "apps/api/src/schema.proto", "proto");
        write(temp.path(), "apps/api/src/page.hbs", "hbs");
        let out = temp.path().join("dist");

        let config = Configuration::from_value(json!({
            "compilerOptions": { "assets": ["**/*.hbs"] },
            "projects": {
                "api": {
                    "sourceRoot": "apps/api/src",
                    "compilerOptions": { "assets": ["**/*.proto"] }
                }
            }
        }))
        .unwrap();

        WorkspaceAssets::new(temp.path())
            .copy_assets(&config, "api", &out)
            .await
            .unwrap();

        assert!(out.join("schema.proto").exists());
        assert!(!out.join("page.hbs").exists());
    }

    #[tokio::test]
    async fn no_assets_configured_is_a_noop() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("dist");
        let config = Configuration::from_value(json!({})).unwrap();

        WorkspaceAssets::new(temp.path())
            .copy_assets(&config, "api", &out)
            .await
            .unwrap();
        assert!(!out.exists());
    }
}
