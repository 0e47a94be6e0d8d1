//! Standing watch strategy.
//!
//! Spawns the compiler in its own watch mode and supervises its output,
//! firing the completion callback once per clean rebuild cycle. File
//! watching itself belongs to the spawned compiler.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use super::{Cycle, OnSuccess, StrategyError, WatchStrategy, supervise_cycles};
use hoist_config::Configuration;

/// Runs `tsc --watch` and reports rebuild cycles.
#[derive(Debug, Clone)]
pub struct TscWatchCompiler {
    command: String,
}

impl TscWatchCompiler {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for TscWatchCompiler {
    fn default() -> Self {
        Self::new("tsc")
    }
}

/// Classify one line of `tsc --watch` output.
///
/// The compiler ends every cycle with a `Found N errors.` summary line.
fn classify_tsc_line(line: &str) -> Cycle {
    if line.contains("Found 0 errors") {
        Cycle::Clean
    } else if line.contains("Found") && line.contains("error") {
        Cycle::Failed
    } else {
        Cycle::InProgress
    }
}

#[async_trait]
impl WatchStrategy for TscWatchCompiler {
    async fn run(
        &self,
        _configuration: &Configuration,
        descriptor_path: &str,
        app_name: &str,
        on_success: Option<OnSuccess>,
    ) -> Result<(), StrategyError> {
        info!(app = app_name, descriptor = descriptor_path, "starting watch");
        let child = Command::new(&self.command)
            .arg("--watch")
            .arg("--preserveWatchOutput")
            .arg("-p")
            .arg(descriptor_path)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| StrategyError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        // A watch process exiting at all is abnormal.
        let status = supervise_cycles(child, classify_tsc_line, on_success.as_ref()).await?;
        Err(StrategyError::WatchEnded { status })
    }
}
