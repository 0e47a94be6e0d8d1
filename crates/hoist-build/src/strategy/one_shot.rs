//! One-shot compiler strategy.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::{OnSuccess, OneShotStrategy, StrategyError};
use hoist_config::Configuration;

/// Runs the TypeScript compiler once against a project descriptor.
#[derive(Debug, Clone)]
pub struct TscCompiler {
    command: String,
}

impl TscCompiler {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for TscCompiler {
    fn default() -> Self {
        Self::new("tsc")
    }
}

#[async_trait]
impl OneShotStrategy for TscCompiler {
    async fn run(
        &self,
        _configuration: &Configuration,
        descriptor_path: &str,
        app_name: &str,
        on_success: Option<OnSuccess>,
    ) -> Result<(), StrategyError> {
        info!(app = app_name, descriptor = descriptor_path, "compiling");
        let status = Command::new(&self.command)
            .arg("-p")
            .arg(descriptor_path)
            .status()
            .await
            .map_err(|source| StrategyError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(StrategyError::CompilerFailed { status });
        }

        debug!(app = app_name, "compilation finished");
        if let Some(callback) = on_success {
            callback();
        }
        Ok(())
    }
}
