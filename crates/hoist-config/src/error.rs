//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}\n\nHint: create a hoist.json or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    #[error("invalid configuration in {path}: {message}\n\nHint: check the JSON syntax and field types")]
    Invalid { path: PathBuf, message: String },

    #[error("invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
