//! Build orchestration entry point.
//!
//! [`BuildOrchestrator::run_build`] is the sequence the whole crate exists
//! for: extract the invocation targets, load configuration, resolve the
//! effective compiler settings, run the pre-build side effects, then
//! dispatch exactly one compilation strategy. Collaborators are injected as
//! trait objects so every step can be observed in tests.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::assets::{AssetsManager, WorkspaceAssets};
use crate::descriptor::{ProjectDescriptorProvider, TsConfigProvider};
use crate::error::{BuildError, Result};
use crate::factory::{ConfigFactory, FileModuleLoader, JsonModuleLoader};
use crate::strategy::{
    BundlerCommand, BundlingStrategy, OnSuccess, OneShotStrategy, TscCompiler, TscWatchCompiler,
    WatchStrategy,
};
use crate::workspace::{OutputDirCleaner, WorkspaceUtils};
use hoist_config::{
    ConfigurationLoader, FileConfigurationLoader, Input, OptionValue, resolve_or,
};

/// Fallback values injected at the resolver call sites.
///
/// These are explicit parameters of the orchestrator rather than hidden
/// module constants so resolution stays pure and testable.
#[derive(Debug, Clone)]
pub struct BuildDefaults {
    /// Output directory when the project descriptor declares none.
    pub out_dir: String,
    /// Descriptor path when neither option nor configuration supplies one.
    pub ts_config_path: String,
    /// Bundler options document consulted when no explicit path is given.
    /// A missing file at this path is tolerated; see [`BuildOrchestrator`].
    pub webpack_config_path: String,
}

impl Default for BuildDefaults {
    fn default() -> Self {
        Self {
            out_dir: "dist".to_string(),
            ts_config_path: "tsconfig.json".to_string(),
            webpack_config_path: "webpack.config.json".to_string(),
        }
    }
}

/// The three mutually exclusive compilation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Bundling,
    Watching,
    OneShot,
}

impl Strategy {
    /// Bundling takes priority over watching, watching over one-shot.
    pub fn select(webpack_enabled: bool, watch_mode: bool) -> Self {
        if webpack_enabled {
            Strategy::Bundling
        } else if watch_mode {
            Strategy::Watching
        } else {
            Strategy::OneShot
        }
    }
}

/// Resolves an invocation and drives exactly one compilation strategy.
pub struct BuildOrchestrator {
    loader: Arc<dyn ConfigurationLoader>,
    descriptors: Arc<dyn ProjectDescriptorProvider>,
    workspace: Arc<dyn WorkspaceUtils>,
    assets: Arc<dyn AssetsManager>,
    modules: Arc<dyn FileModuleLoader>,
    one_shot: Arc<dyn OneShotStrategy>,
    watch: Arc<dyn WatchStrategy>,
    bundler: Arc<dyn BundlingStrategy>,
    defaults: BuildDefaults,
}

impl Default for BuildOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildOrchestrator {
    /// Orchestrator wired to the filesystem-backed collaborators the CLI
    /// uses.
    pub fn new() -> Self {
        Self {
            loader: Arc::new(FileConfigurationLoader),
            descriptors: Arc::new(TsConfigProvider),
            workspace: Arc::new(OutputDirCleaner),
            assets: Arc::new(WorkspaceAssets::default()),
            modules: Arc::new(JsonModuleLoader),
            one_shot: Arc::new(TscCompiler::default()),
            watch: Arc::new(TscWatchCompiler::default()),
            bundler: Arc::new(BundlerCommand::default()),
            defaults: BuildDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: BuildDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_loader(mut self, loader: Arc<dyn ConfigurationLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_descriptors(mut self, descriptors: Arc<dyn ProjectDescriptorProvider>) -> Self {
        self.descriptors = descriptors;
        self
    }

    pub fn with_workspace(mut self, workspace: Arc<dyn WorkspaceUtils>) -> Self {
        self.workspace = workspace;
        self
    }

    pub fn with_assets(mut self, assets: Arc<dyn AssetsManager>) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_module_loader(mut self, modules: Arc<dyn FileModuleLoader>) -> Self {
        self.modules = modules;
        self
    }

    pub fn with_one_shot(mut self, strategy: Arc<dyn OneShotStrategy>) -> Self {
        self.one_shot = strategy;
        self
    }

    pub fn with_watch(mut self, strategy: Arc<dyn WatchStrategy>) -> Self {
        self.watch = strategy;
        self
    }

    pub fn with_bundler(mut self, strategy: Arc<dyn BundlingStrategy>) -> Self {
        self.bundler = strategy;
        self
    }

    /// Run one build invocation.
    ///
    /// `inputs` carries the positional arguments (the target application
    /// under the name `app`); `options` carries the named options (`config`,
    /// `path`, `webpack`, `webpackPath`). Under the watch strategy, and the
    /// bundling strategy's watch sub-mode, this call does not return under
    /// normal operation; success is reported per rebuild cycle through
    /// `on_success`.
    ///
    /// # Errors
    ///
    /// Propagates collaborator failures unchanged: configuration load
    /// errors, descriptor errors, cleanup and asset-copy failures, explicit
    /// bundler-configuration load failures, and strategy failures. Nothing
    /// is retried and no second strategy runs after the selected one fails.
    pub async fn run_build(
        &self,
        inputs: &[Input],
        options: &[Input],
        watch_mode: bool,
        debug_enabled: bool,
        on_success: Option<OnSuccess>,
    ) -> Result<()> {
        let config_file = require_string(options, "config")?;
        let app_name = require_string(inputs, "app")?;

        let configuration = self.loader.load(&config_file)?;

        let ts_config_path = resolve_or(
            &configuration,
            "compilerOptions.tsConfigPath",
            &app_name,
            "path",
            options,
            self.defaults.ts_config_path.clone(),
        );
        let descriptor = self.descriptors.get_by_path(&ts_config_path).await?;
        let out_dir = descriptor
            .options
            .out_dir
            .unwrap_or_else(|| self.defaults.out_dir.clone());

        let webpack_enabled = resolve_or(
            &configuration,
            "compilerOptions.webpack",
            &app_name,
            "webpack",
            options,
            false,
        );

        // Pre-build side effects run before any strategy, whichever is
        // selected.
        self.workspace
            .delete_out_dir_if_enabled(&configuration, &app_name, Path::new(&out_dir))?;
        self.assets
            .copy_assets(&configuration, &app_name, Path::new(&out_dir))
            .await?;

        let selected = Strategy::select(webpack_enabled, watch_mode);
        info!(app = %app_name, strategy = ?selected, "dispatching build");
        match selected {
            Strategy::Bundling => {
                let requested = resolve_or(
                    &configuration,
                    "compilerOptions.webpackConfigPath",
                    &app_name,
                    "webpackPath",
                    options,
                    self.defaults.webpack_config_path.clone(),
                );
                let factory = self.load_factory(&requested).await?;
                self.bundler
                    .run(
                        &configuration,
                        factory,
                        &ts_config_path,
                        &app_name,
                        debug_enabled,
                        watch_mode,
                        on_success,
                    )
                    .await?;
            }
            Strategy::Watching => {
                self.watch
                    .run(&configuration, &ts_config_path, &app_name, on_success)
                    .await?;
            }
            Strategy::OneShot => {
                self.one_shot
                    .run(&configuration, &ts_config_path, &app_name, on_success)
                    .await?;
            }
        }
        Ok(())
    }

    /// Load the bundler options factory for `requested`.
    ///
    /// The asymmetry here is deliberate and load-bearing: a failure at an
    /// explicitly requested path is fatal, while a failure at the implicit
    /// default path silently yields the identity factory. The two cases are
    /// told apart by comparing the requested path against the injected
    /// default.
    async fn load_factory(&self, requested: &str) -> Result<ConfigFactory> {
        match self.modules.load(Path::new(requested)).await {
            Ok(factory) => Ok(factory),
            Err(source) if requested == self.defaults.webpack_config_path => {
                debug!(path = requested, error = %source, "no bundler configuration at default path");
                Ok(ConfigFactory::Identity)
            }
            Err(source) => Err(BuildError::FactoryLoad {
                path: requested.into(),
                source,
            }),
        }
    }
}

fn require_string(list: &[Input], name: &'static str) -> Result<String> {
    match Input::lookup(list, name) {
        Some(OptionValue::String(text)) => Ok(text.clone()),
        _ => Err(BuildError::MissingRequiredArgument(name)),
    }
}
