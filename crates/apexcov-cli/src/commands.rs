//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Apexcov: run Apex tests and write HTML/XML coverage reports
#[derive(Parser, Debug)]
#[command(name = "apexcov")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Project configuration file
    #[arg(long, default_value = "apexcov.yaml", global = true)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run test classes on an org and write the coverage report
    Run(RunArgs),

    /// Write the coverage report from a saved run result
    Replay(ReplayArgs),

    /// Regenerate the HTML report from an XML snapshot
    Report(ReportArgs),

    /// List the project's classes and triggers
    Classes(ClassesArgs),
}

/// Options shared by `run` and `replay`
#[derive(Parser, Debug, Default)]
pub struct PipelineArgs {
    /// Test class to run (repeatable; overrides the configured list)
    #[arg(long = "class", value_name = "NAME")]
    pub classes: Vec<String>,

    /// Output directory for reports
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Coverage threshold percent (0-100)
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Do not fail on classes below the coverage threshold
    #[arg(long)]
    pub no_coverage_check: bool,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Org instance URL
    #[arg(long, env = "SF_INSTANCE_URL")]
    pub instance_url: String,

    /// OAuth access token
    #[arg(long, env = "SF_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Tooling API version (e.g. 60.0)
    #[arg(long)]
    pub api_version: Option<String>,

    /// Save the raw run result as JSON
    #[arg(long, value_name = "FILE")]
    pub save_raw: Option<PathBuf>,

    /// Shared pipeline options
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Arguments for the replay command
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Saved run result (Tooling API JSON)
    pub raw: PathBuf,

    /// Shared pipeline options
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// XML snapshot written by a previous run
    pub xml: PathBuf,

    /// Output directory for the HTML report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Coverage threshold percent (0-100)
    #[arg(long)]
    pub threshold: Option<u8>,
}

/// Arguments for the classes command
#[derive(Parser, Debug)]
pub struct ClassesArgs {
    /// Source directory (overrides the configured one)
    #[arg(long)]
    pub src: Option<PathBuf>,
}

/// Color output argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Detect terminal support
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}
