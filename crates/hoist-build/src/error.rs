//! Top-level build errors.
//!
//! `BuildError` is the single error type propagated out of
//! [`crate::BuildOrchestrator::run_build`]. Collaborator failures convert
//! into it via `#[from]` and are surfaced to the user unchanged. The
//! orchestrator never retries and never falls back to a different strategy
//! after one fails.

use std::path::PathBuf;

use thiserror::Error;

use crate::assets::AssetError;
use crate::descriptor::DescriptorError;
use crate::factory::FactoryError;
use crate::strategy::StrategyError;
use crate::workspace::WorkspaceError;
use hoist_config::ConfigError;

pub type Result<T, E = BuildError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BuildError {
    /// The `app` input or `config` option was absent from the invocation.
    ///
    /// These are validated by the argument-parsing layer; reaching this
    /// variant means a caller bypassed it.
    #[error("missing required argument '{0}'\n\nHint: pass the application name and a --config file")]
    MissingRequiredArgument(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Assets(#[from] AssetError),

    /// A bundler options document was requested from an explicit,
    /// non-default path and could not be loaded. The implicit default path
    /// never produces this error; its absence is tolerated.
    #[error("failed to load bundler configuration from {}: {source}", .path.display())]
    FactoryLoad {
        path: PathBuf,
        #[source]
        source: FactoryError,
    },

    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
