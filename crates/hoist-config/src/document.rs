//! The workspace configuration document.
//!
//! Mirrors the on-disk `hoist.json` shape: a global `compilerOptions`
//! section plus a `projects` map of per-application overrides. The document
//! keeps its raw JSON alongside the typed views because the precedence
//! resolver navigates arbitrary dotted paths rather than fixed fields.
//!
//! The typed views are best-effort: a leaf whose JSON type does not match
//! the expected one is treated as absent here, and dotted-path resolution
//! decides whether a lower-precedence source supplies it instead. Only
//! structural breakage (a document or `projects` section that is not a JSON
//! object) fails the load.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default)]
pub struct Configuration {
    /// Root of the default application's sources, relative to the workspace.
    pub source_root: Option<String>,

    pub compiler_options: CompilerOptions,

    /// Per-application overrides, keyed by application name.
    pub projects: HashMap<String, ProjectOverride>,

    raw: Value,
}

#[derive(Debug, Clone, Default)]
pub struct CompilerOptions {
    pub ts_config_path: Option<String>,
    pub webpack: Option<bool>,
    pub webpack_config_path: Option<String>,
    pub delete_out_dir: Option<bool>,
    pub assets: Vec<AssetSpec>,
}

/// A per-application override block.
///
/// Only `root` and `sourceRoot` are consumed as typed fields; everything
/// else (notably a nested `compilerOptions`) is kept as raw JSON and read
/// through dotted-path resolution.
#[derive(Debug, Clone, Default)]
pub struct ProjectOverride {
    pub root: Option<String>,
    pub source_root: Option<String>,
    pub compiler_options: Value,
}

/// One entry of `compilerOptions.assets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetSpec {
    /// Bare glob pattern, copied relative to the source root.
    Pattern(String),
    /// Pattern with optional exclusion and a target subdirectory.
    #[serde(rename_all = "camelCase")]
    Detailed {
        include: String,
        exclude: Option<String>,
        out_dir: Option<String>,
    },
}

impl Configuration {
    /// Build a configuration from an already-parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self> {
        let root = value.as_object().ok_or_else(|| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            value: value_kind(&value).to_string(),
            hint: "hoist.json must be a JSON object".to_string(),
        })?;

        let projects = match root.get("projects") {
            None => HashMap::new(),
            Some(section) => {
                let map = section.as_object().ok_or_else(|| ConfigError::InvalidValue {
                    field: "projects".to_string(),
                    value: value_kind(section).to_string(),
                    hint: "projects must map application names to override blocks".to_string(),
                })?;
                map.iter()
                    .map(|(name, block)| (name.clone(), ProjectOverride::from_raw(block)))
                    .collect()
            }
        };

        let source_root = typed(root.get("sourceRoot"));
        let compiler_options = CompilerOptions::from_raw(root.get("compilerOptions"));

        Ok(Self {
            source_root,
            compiler_options,
            projects,
            raw: value,
        })
    }

    /// The raw JSON document backing this configuration.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Look up `dotted_path` (for example `compilerOptions.webpack`) in the
    /// global document.
    pub fn global(&self, dotted_path: &str) -> Option<&Value> {
        navigate(&self.raw, dotted_path)
    }

    /// Look up `dotted_path` inside the override block for `app_name`.
    ///
    /// An application with no override block behaves exactly like one with
    /// an empty block: the lookup misses.
    pub fn override_for(&self, app_name: &str, dotted_path: &str) -> Option<&Value> {
        let block = self.raw.get("projects")?.get(app_name)?;
        navigate(block, dotted_path)
    }

    /// The source root for `app_name`: the override's `sourceRoot`, or the
    /// global one, or `"src"`.
    pub fn source_root_for(&self, app_name: &str) -> &str {
        self.projects
            .get(app_name)
            .and_then(|project| project.source_root.as_deref())
            .or(self.source_root.as_deref())
            .unwrap_or("src")
    }
}

impl CompilerOptions {
    fn from_raw(section: Option<&Value>) -> Self {
        let Some(section) = section else {
            return Self::default();
        };
        // Asset entries are filtered individually so one malformed entry
        // does not discard the rest.
        let assets = section
            .get("assets")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(|item| typed(Some(item))).collect())
            .unwrap_or_default();
        Self {
            ts_config_path: typed(section.get("tsConfigPath")),
            webpack: typed(section.get("webpack")),
            webpack_config_path: typed(section.get("webpackConfigPath")),
            delete_out_dir: typed(section.get("deleteOutDir")),
            assets,
        }
    }
}

impl ProjectOverride {
    fn from_raw(block: &Value) -> Self {
        Self {
            root: typed(block.get("root")),
            source_root: typed(block.get("sourceRoot")),
            compiler_options: block.get("compilerOptions").cloned().unwrap_or_default(),
        }
    }
}

fn typed<T: DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    value.and_then(|v| serde_json::from_value(v.clone()).ok())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn navigate<'a>(root: &'a Value, dotted_path: &str) -> Option<&'a Value> {
    let mut cursor = root;
    for segment in dotted_path.split('.') {
        cursor = cursor.get(segment)?;
    }
    Some(cursor)
}
