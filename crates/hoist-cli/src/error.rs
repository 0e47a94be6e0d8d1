//! CLI error handling.
//!
//! `CliError` is the top-level catch boundary: every failure from the
//! orchestration layer converts into it and is rendered as a miette
//! diagnostic by `main`. Errors reaching this boundary always terminate the
//! command with a non-zero exit status; nothing below it retries.

use miette::Report;
use thiserror::Error;

use hoist_build::BuildError;

pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Build(#[from] BuildError),
}

/// Convert a CLI error into a miette report for user-facing rendering.
///
/// The underlying error message is passed through unchanged so the hint
/// text attached to the source error survives to the terminal.
pub fn cli_error_to_miette(err: CliError) -> Report {
    miette::miette!("{err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_error_converts() {
        let err: CliError = BuildError::MissingRequiredArgument("app").into();
        assert!(matches!(err, CliError::Build(_)));
    }

    #[test]
    fn report_keeps_hint_text() {
        let report = cli_error_to_miette(BuildError::MissingRequiredArgument("app").into());
        let rendered = report.to_string();
        assert!(rendered.contains("missing required argument 'app'"));
        assert!(rendered.contains("Hint:"));
    }
}
