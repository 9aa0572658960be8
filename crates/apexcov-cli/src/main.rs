//! Apexcov CLI: Apex test runs with HTML/XML coverage reports
//!
//! ## Usage
//!
//! ```bash
//! apexcov run --class FooTest            # Run on the org in SF_INSTANCE_URL
//! apexcov run --save-raw raw.json        # Also keep the raw result
//! apexcov replay raw.json                # Report from a saved result
//! apexcov report coverage-report/coverage-report.xml
//! apexcov classes                        # List project classes/triggers
//! ```

use apexcov_cli::{
    handlers, logging::init_logging, Cli, CliConfig, CliResult, ColorChoice, Commands,
    ProjectConfig, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    init_logging(config.verbosity, config.color.should_color());
    let project = ProjectConfig::load_or_default(&cli.config)?;

    match cli.command {
        #[cfg(feature = "remote")]
        Commands::Run(args) => handlers::execute_run(&config, &project, &args),
        #[cfg(not(feature = "remote"))]
        Commands::Run(_) => Err(apexcov_cli::CliError::config(
            "remote runs not enabled. Rebuild with --features remote",
        )),
        Commands::Replay(args) => handlers::execute_replay(&config, &project, &args),
        Commands::Report(args) => handlers::execute_report(&config, &project, &args).map(|_| ()),
        Commands::Classes(args) => handlers::execute_classes(&project, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
