//! Bundling strategy.
//!
//! Builds the base bundler options for the invocation, lets the resolved
//! [`ConfigFactory`] transform them, and hands the final document to the
//! spawned bundler through the `HOIST_BUNDLER_OPTIONS` environment variable.
//! Whether the factory replaces or merges the base is decided here, not in
//! the orchestrator.

use std::process::Stdio;

use async_trait::async_trait;
use serde_json::json;
use tokio::process::Command;
use tracing::{debug, info};

use super::{BundlingStrategy, Cycle, OnSuccess, StrategyError, supervise_cycles};
use crate::factory::ConfigFactory;
use hoist_config::Configuration;

/// Environment variable carrying the final options document to the bundler.
pub const BUNDLER_OPTIONS_ENV: &str = "HOIST_BUNDLER_OPTIONS";

/// Runs the configured bundler command.
#[derive(Debug, Clone)]
pub struct BundlerCommand {
    command: String,
}

impl BundlerCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for BundlerCommand {
    fn default() -> Self {
        Self::new("webpack")
    }
}

fn base_options(
    configuration: &Configuration,
    descriptor_path: &str,
    app_name: &str,
    debug_enabled: bool,
) -> serde_json::Value {
    // "devtool" is a source-map name in debug builds and the literal false
    // otherwise.
    let devtool = if debug_enabled {
        json!("inline-source-map")
    } else {
        json!(false)
    };
    json!({
        "name": app_name,
        "mode": if debug_enabled { "development" } else { "production" },
        "devtool": devtool,
        "tsConfig": descriptor_path,
        "sourceRoot": configuration.source_root_for(app_name),
    })
}

fn classify_bundler_line(line: &str) -> Cycle {
    let lowered = line.to_ascii_lowercase();
    if lowered.contains("compiled successfully") {
        Cycle::Clean
    } else if lowered.contains("compiled with") && lowered.contains("error") {
        Cycle::Failed
    } else {
        Cycle::InProgress
    }
}

#[async_trait]
impl BundlingStrategy for BundlerCommand {
    async fn run(
        &self,
        configuration: &Configuration,
        factory: ConfigFactory,
        descriptor_path: &str,
        app_name: &str,
        debug_enabled: bool,
        watch_mode: bool,
        on_success: Option<OnSuccess>,
    ) -> Result<(), StrategyError> {
        let base = base_options(configuration, descriptor_path, app_name, debug_enabled);
        let options = factory.apply(base);
        let payload = serde_json::to_string(&options)?;
        debug!(app = app_name, options = %payload, "bundler options resolved");

        let mut command = Command::new(&self.command);
        command.env(BUNDLER_OPTIONS_ENV, payload);
        if watch_mode {
            command.arg("--watch");
        }

        info!(app = app_name, watch = watch_mode, "starting bundler");
        if watch_mode {
            let child = command
                .stdout(Stdio::piped())
                .spawn()
                .map_err(|source| StrategyError::Spawn {
                    command: self.command.clone(),
                    source,
                })?;
            let status =
                supervise_cycles(child, classify_bundler_line, on_success.as_ref()).await?;
            return Err(StrategyError::WatchEnded { status });
        }

        let status = command
            .status()
            .await
            .map_err(|source| StrategyError::Spawn {
                command: self.command.clone(),
                source,
            })?;
        if !status.success() {
            return Err(StrategyError::BundlerFailed { status });
        }
        if let Some(callback) = on_success {
            callback();
        }
        Ok(())
    }
}
