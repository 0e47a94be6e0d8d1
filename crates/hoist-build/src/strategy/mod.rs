//! Compilation strategies.
//!
//! Exactly one strategy runs per orchestration call:
//!
//! - [`OneShotStrategy`] compiles once and returns;
//! - [`WatchStrategy`] holds a standing watch and reports each clean rebuild
//!   cycle through the [`OnSuccess`] callback; it does not return under
//!   normal operation;
//! - [`BundlingStrategy`] drives the bundler with a resolved options
//!   document and supports its own watch sub-mode.
//!
//! The concrete implementations spawn the external compiler/bundler
//! processes; they never reimplement them.

mod bundle;
mod one_shot;
mod watch;

use std::process::ExitStatus;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child;
use tracing::{info, warn};

pub use bundle::{BUNDLER_OPTIONS_ENV, BundlerCommand};
pub use one_shot::TscCompiler;
pub use watch::TscWatchCompiler;

use crate::factory::ConfigFactory;
use hoist_config::Configuration;

/// Invoked once per successful build cycle.
pub type OnSuccess = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("failed to spawn '{command}': {source}\n\nHint: ensure it is installed and on PATH")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("compiler exited with status {status}")]
    CompilerFailed { status: ExitStatus },

    #[error("bundler exited with status {status}")]
    BundlerFailed { status: ExitStatus },

    #[error("watch process ended unexpectedly with status {status}")]
    WatchEnded { status: ExitStatus },

    #[error("failed to serialize bundler options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("I/O error supervising the build process: {0}")]
    Io(#[from] std::io::Error),
}

/// Single incremental compiler pass.
#[async_trait]
pub trait OneShotStrategy: Send + Sync {
    async fn run(
        &self,
        configuration: &Configuration,
        descriptor_path: &str,
        app_name: &str,
        on_success: Option<OnSuccess>,
    ) -> Result<(), StrategyError>;
}

/// Standing watch compiler. `run` does not return under normal operation.
#[async_trait]
pub trait WatchStrategy: Send + Sync {
    async fn run(
        &self,
        configuration: &Configuration,
        descriptor_path: &str,
        app_name: &str,
        on_success: Option<OnSuccess>,
    ) -> Result<(), StrategyError>;
}

/// Bundling compiler run.
#[async_trait]
pub trait BundlingStrategy: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn run(
        &self,
        configuration: &Configuration,
        factory: ConfigFactory,
        descriptor_path: &str,
        app_name: &str,
        debug_enabled: bool,
        watch_mode: bool,
        on_success: Option<OnSuccess>,
    ) -> Result<(), StrategyError>;
}

/// The per-line verdict a cycle classifier gives while supervising a watch
/// process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cycle {
    Clean,
    Failed,
    InProgress,
}

/// Supervise a long-running child, firing `on_success` on each clean cycle.
///
/// Returns only when the child exits, which a watch process is not expected
/// to do; the caller decides how to report that.
pub(crate) async fn supervise_cycles(
    mut child: Child,
    classify: impl Fn(&str) -> Cycle,
    on_success: Option<&OnSuccess>,
) -> Result<ExitStatus, StrategyError> {
    let Some(stdout) = child.stdout.take() else {
        return Err(StrategyError::Io(std::io::Error::other(
            "child stdout was not piped",
        )));
    };
    let mut lines = BufReader::new(stdout).lines();

    while let Some(line) = lines.next_line().await? {
        match classify(&line) {
            Cycle::Clean => {
                info!("{line}");
                if let Some(callback) = on_success {
                    callback();
                }
            }
            Cycle::Failed => warn!("{line}"),
            Cycle::InProgress => info!("{line}"),
        }
    }

    Ok(child.wait().await?)
}
