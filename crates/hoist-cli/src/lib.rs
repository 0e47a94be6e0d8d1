//! hoist CLI library.
//!
//! Exposed as a library so the command implementations are testable without
//! spawning the binary. The actual entry point lives in `main.rs`.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;
