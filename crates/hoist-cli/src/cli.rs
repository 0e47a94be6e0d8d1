//! Command-line interface definition.
//!
//! Defines the `hoist` CLI with clap v4 derive macros. The build command's
//! arguments are converted into the positional/optional `Input` lists the
//! orchestrator consumes, so everything downstream of parsing works with
//! the same named-value model regardless of how the invocation arrived.

use clap::{Args, Parser, Subcommand};

use hoist_config::{DEFAULT_CONFIG_FILE, Input, OptionValue};

/// hoist - configuration-driven build orchestration for TypeScript workspaces
#[derive(Parser, Debug)]
#[command(
    name = "hoist",
    version,
    about = "Configuration-driven build orchestration for TypeScript workspaces",
    long_about = "hoist resolves effective build settings from command-line options,\n\
                  per-application overrides, and workspace configuration, then drives\n\
                  one of three compilation strategies: a one-shot compile, a standing\n\
                  watch, or a bundler run."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an application target
    ///
    /// Resolves the effective compiler settings for the named application
    /// and runs the selected compilation strategy to completion, or keeps
    /// a watch standing when --watch is given.
    Build(BuildArgs),
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Application to build
    ///
    /// Must match a key of the `projects` section in the configuration
    /// file, or name the workspace's default application.
    #[arg(value_name = "APP")]
    pub app: String,

    /// Workspace configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, value_name = "FILE")]
    pub config: String,

    /// TypeScript project descriptor path
    ///
    /// Overrides `compilerOptions.tsConfigPath` from the configuration.
    #[arg(short, long, value_name = "FILE")]
    pub path: Option<String>,

    /// Force the bundling strategy on or off
    ///
    /// Overrides `compilerOptions.webpack` from the configuration.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub webpack: Option<bool>,

    /// Bundler options document
    ///
    /// Overrides `compilerOptions.webpackConfigPath`. An explicitly given
    /// path must exist; the implicit default may be absent.
    #[arg(long = "webpack-path", value_name = "FILE")]
    pub webpack_path: Option<String>,

    /// Rebuild whenever source files change
    #[arg(short, long)]
    pub watch: bool,

    /// Build with development settings and source maps
    #[arg(short, long)]
    pub debug: bool,
}

impl BuildArgs {
    /// Positional inputs for the orchestrator.
    pub fn inputs(&self) -> Vec<Input> {
        vec![Input::new("app", self.app.clone())]
    }

    /// Named options for the orchestrator. Flags the user did not supply
    /// are carried as `Unset` so they never shadow configuration values.
    pub fn options(&self) -> Vec<Input> {
        vec![
            Input::new("config", self.config.clone()),
            Input::new("path", OptionValue::from(self.path.clone())),
            Input::new("webpack", OptionValue::from(self.webpack)),
            Input::new("webpackPath", OptionValue::from(self.webpack_path.clone())),
        ]
    }
}
