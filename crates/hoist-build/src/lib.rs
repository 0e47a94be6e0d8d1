//! Build orchestration for hoist.
//!
//! This crate turns a resolved invocation into exactly one compilation run.
//! [`BuildOrchestrator::run_build`] loads the workspace configuration,
//! resolves the effective compiler settings through
//! [`hoist_config::resolve`], performs the pre-build side effects (output
//! directory cleanup, asset copying), and dispatches one of three mutually
//! exclusive strategies:
//!
//! - [`OneShotStrategy`]: a single compiler pass that returns on completion;
//! - [`WatchStrategy`]: a standing watch that reports each rebuild cycle
//!   through a callback and does not return under normal operation;
//! - [`BundlingStrategy`]: a bundler run fed by a user-supplied options
//!   document (with its own watch sub-mode).
//!
//! The compiler, bundler, and file-watching machinery themselves are
//! external programs; this crate spawns and supervises them but does not
//! reimplement them. Every collaborator sits behind a trait so the
//! orchestration sequence is testable with recording stubs.

mod assets;
mod descriptor;
mod error;
mod factory;
mod orchestrator;
pub mod strategy;
mod workspace;

pub use assets::{AssetError, AssetsManager, WorkspaceAssets};
pub use descriptor::{
    DescriptorError, DescriptorOptions, ProjectDescriptor, ProjectDescriptorProvider,
    TsConfigProvider,
};
pub use error::{BuildError, Result};
pub use factory::{ConfigFactory, FactoryError, FileModuleLoader, JsonModuleLoader};
pub use orchestrator::{BuildDefaults, BuildOrchestrator, Strategy};
pub use strategy::{
    BundlerCommand, BundlingStrategy, OnSuccess, OneShotStrategy, StrategyError, TscCompiler,
    TscWatchCompiler, WatchStrategy,
};
pub use workspace::{OutputDirCleaner, WorkspaceError, WorkspaceUtils};
