//! Project descriptor loading.
//!
//! A project descriptor is the tsconfig file naming the compiler settings
//! for one application. The orchestrator only consumes the declared output
//! directory; everything else belongs to the spawned compiler. Descriptors
//! may carry comments and trailing commas and may defer `outDir` to a parent
//! file through a relative `extends` chain.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("project descriptor not found: {}\n\nHint: check compilerOptions.tsConfigPath or pass --path", .0.display())]
    NotFound(PathBuf),

    #[error("invalid project descriptor {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("descriptor extends chain too deep starting at {}", .0.display())]
    ExtendsTooDeep(PathBuf),

    #[error("I/O error reading descriptor: {0}")]
    Io(#[from] std::io::Error),
}

/// Compiler settings parsed from a descriptor file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDescriptor {
    pub options: DescriptorOptions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorOptions {
    /// Declared output directory, relative to the workspace.
    pub out_dir: Option<String>,
}

/// Fetches parsed compiler settings for a descriptor path.
#[async_trait]
pub trait ProjectDescriptorProvider: Send + Sync {
    async fn get_by_path(&self, path: &str) -> Result<ProjectDescriptor, DescriptorError>;
}

/// Filesystem-backed provider for tsconfig-style descriptors.
#[derive(Debug, Clone, Default)]
pub struct TsConfigProvider;

const MAX_EXTENDS_DEPTH: usize = 8;

#[async_trait]
impl ProjectDescriptorProvider for TsConfigProvider {
    async fn get_by_path(&self, path: &str) -> Result<ProjectDescriptor, DescriptorError> {
        let start = PathBuf::from(path);
        let mut current = start.clone();
        for _ in 0..MAX_EXTENDS_DEPTH {
            let document = read_descriptor(&current).await?;
            if let Some(out_dir) = document
                .get("compilerOptions")
                .and_then(|options| options.get("outDir"))
                .and_then(Value::as_str)
            {
                return Ok(ProjectDescriptor {
                    options: DescriptorOptions {
                        out_dir: Some(out_dir.to_string()),
                    },
                });
            }

            match document.get("extends").and_then(Value::as_str) {
                Some(parent) => {
                    debug!(from = %current.display(), to = parent, "following descriptor extends");
                    current = resolve_extends(&current, parent);
                }
                None => {
                    return Ok(ProjectDescriptor::default());
                }
            }
        }
        Err(DescriptorError::ExtendsTooDeep(start))
    }
}

async fn read_descriptor(path: &Path) -> Result<Value, DescriptorError> {
    if !path.exists() {
        return Err(DescriptorError::NotFound(path.to_path_buf()));
    }
    let text = tokio::fs::read_to_string(path).await?;
    let cleaned = strip_jsonc(&text);
    serde_json::from_str(&cleaned).map_err(|e| DescriptorError::Invalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn resolve_extends(current: &Path, parent: &str) -> PathBuf {
    let base = current.parent().unwrap_or_else(|| Path::new("."));
    let mut resolved = base.join(parent);
    if resolved.extension().is_none() && !resolved.exists() {
        resolved.set_extension("json");
    }
    resolved
}

/// Strip `//` and `/* */` comments and trailing commas so the descriptor
/// parses as strict JSON. String contents are preserved untouched. Two
/// passes: commas can only be judged trailing once comments are gone.
fn strip_jsonc(text: &str) -> String {
    strip_trailing_commas(&strip_comments(text))
}

fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string = false;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            out.push(b);
            if b == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if b == b'"' {
                in_string = false;
            }
            i += 1;
        } else if b == b'"' {
            in_string = true;
            out.push(b);
            i += 1;
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i += 2;
            while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                i += 1;
            }
            i += 2;
        } else {
            out.push(b);
            i += 1;
        }
    }

    String::from_utf8(out).unwrap_or_else(|_| text.to_string())
}

fn strip_trailing_commas(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string = false;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            out.push(b);
            if b == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if b == b'"' {
                in_string = false;
            }
            i += 1;
        } else if b == b'"' {
            in_string = true;
            out.push(b);
            i += 1;
        } else if b == b',' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if !matches!(bytes.get(j).copied(), Some(b'}') | Some(b']')) {
                out.push(b);
            }
            i += 1;
        } else {
            out.push(b);
            i += 1;
        }
    }

    String::from_utf8(out).unwrap_or_else(|_| text.to_string())
}
