//! hoist CLI entry point.
//!
//! Parses arguments, initializes logging, dispatches the command, and maps
//! any propagated error to a miette diagnostic. An error reaching this
//! boundary terminates the command with a non-zero exit status; it never
//! crashes the process with an unhandled fault.

use clap::Parser;
use hoist_cli::{cli, commands, error};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    hoist_cli::ui::init_colors(args.no_color);
    hoist_cli::logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
