//! Apexcov CLI Library
//!
//! Command-line interface for running Apex tests and writing coverage reports.

#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{
    ClassesArgs, Cli, ColorArg, Commands, PipelineArgs, ReplayArgs, ReportArgs, RunArgs,
};
pub use config::{CliConfig, ColorChoice, ProjectConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{summary_line, ProgressReporter};
