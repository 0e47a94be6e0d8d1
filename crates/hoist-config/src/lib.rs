//! Configuration model and precedence resolution for the hoist build
//! orchestrator.
//!
//! A hoist workspace is described by a single JSON document (`hoist.json` by
//! default) holding global compiler options plus per-application overrides
//! under a `projects` section. At build time the effective value of any
//! setting is computed by [`resolve`], which consults four sources in strict
//! precedence order: explicit command-line option, per-application override,
//! global document value, caller-supplied default.
//!
//! The resolver is pure (it performs no I/O and never fails), so every
//! precedence decision is unit-testable against constructed fixtures.

mod document;
mod error;
mod input;
mod loader;
mod resolver;

pub use document::{AssetSpec, CompilerOptions, Configuration, ProjectOverride};
pub use error::{ConfigError, Result};
pub use input::{Input, OptionValue};
pub use loader::{ConfigurationLoader, FileConfigurationLoader, DEFAULT_CONFIG_FILE};
pub use resolver::{resolve, resolve_or};
