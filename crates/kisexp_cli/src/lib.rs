//! Command-line formatter and checker for KiCad s-expression files.
//!
//! This crate provides:
//! - [`args`] - Hand-rolled argument parsing into a [`CliConfig`]
//! - [`commands`] - The `fmt`, `check` and `roundtrip` subcommands
//! - [`logger`] - A stderr [`log`] backend

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod args;
pub mod commands;
pub mod logger;

pub use args::{CliConfig, Command, parse_args};
pub use commands::run;

use thiserror::Error;

/// Failures of a CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command line itself is wrong.
    #[error("{0}")]
    Usage(String),

    /// Some input files failed; their reports were already written.
    #[error("{0} file(s) failed")]
    Failed(usize),

    /// Writing results failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Another logger was installed first.
    #[error("cannot install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
