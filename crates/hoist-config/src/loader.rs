//! Configuration file loading.

use std::path::Path;

use figment::{
    Figment,
    providers::{Format as _, Json},
};
use serde_json::Value;
use tracing::debug;

use crate::document::Configuration;
use crate::error::{ConfigError, Result};

/// File consulted when the invocation does not name one explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "hoist.json";

/// Loads the workspace configuration document from a named file.
pub trait ConfigurationLoader: Send + Sync {
    /// Load and parse `file_name`.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::NotFound`] when the file does not exist and
    /// [`ConfigError::Invalid`] when it is not a well-formed document.
    fn load(&self, file_name: &str) -> Result<Configuration>;
}

/// Filesystem-backed loader used by the CLI.
#[derive(Debug, Clone, Default)]
pub struct FileConfigurationLoader;

impl ConfigurationLoader for FileConfigurationLoader {
    fn load(&self, file_name: &str) -> Result<Configuration> {
        let path = Path::new(file_name);
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        debug!(file = %path.display(), "loading configuration");
        let value: Value = Figment::new()
            .merge(Json::file(path))
            .extract()
            .map_err(|e| ConfigError::Invalid {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Configuration::from_value(value)
    }
}
