//! Command implementations.

mod build;

pub use build::execute as build_execute;
