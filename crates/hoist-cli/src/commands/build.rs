//! Build command implementation.
//!
//! Thin shell around [`BuildOrchestrator`]: convert the parsed arguments
//! into the orchestrator's input lists, wire a per-cycle success callback,
//! and report the outcome. In watch mode the orchestrator call does not
//! return; each clean rebuild is announced through the callback instead.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::cli::BuildArgs;
use crate::error::Result;
use crate::ui;
use hoist_build::{BuildOrchestrator, OnSuccess};

/// Execute the build command.
///
/// # Errors
///
/// Propagates every orchestration failure: configuration and descriptor
/// errors, explicit bundler-configuration load failures, and strategy
/// failures.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();
    ui::info(&format!("Building {}...", args.app));

    let inputs = args.inputs();
    let options = args.options();
    debug!(?inputs, ?options, "assembled invocation");
    let app = args.app.clone();
    let watching = args.watch;
    let on_success: OnSuccess = Arc::new(move || {
        if watching {
            ui::success(&format!("{app} rebuilt, watching for changes"));
        }
    });

    let orchestrator = BuildOrchestrator::new();
    orchestrator
        .run_build(&inputs, &options, args.watch, args.debug, Some(on_success))
        .await?;

    // Only the one-shot and non-watch bundling paths reach this point.
    ui::success(&format!(
        "{} built in {}",
        args.app,
        ui::format_duration(start_time.elapsed())
    ));
    Ok(())
}
