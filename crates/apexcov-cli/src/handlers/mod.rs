//! Command handlers - extracted from main.rs for testability
//!
//! `run` and `replay` share one pipeline: merge flags over the project
//! config, scan sources, execute the task, print, then turn a failing
//! verdict into an error.

pub mod classes;
pub mod replay;
pub mod report;
pub mod run;

pub use classes::execute_classes;
pub use replay::execute_replay;
pub use report::execute_report;
#[cfg(feature = "remote")]
pub use run::execute_run;
pub use run::SavingService;

use crate::commands::PipelineArgs;
use crate::config::{CliConfig, ProjectConfig};
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use apexcov::{
    CoverageReport, CoverageThreshold, ProjectSources, ReportLayout, RunTest, TaskOutcome, TestRunService,
    TestTask, Verdict,
};

/// Effective settings for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Requested test classes
    pub tests: Vec<RunTest>,
    /// Report layout
    pub layout: ReportLayout,
    /// Coverage threshold
    pub threshold: CoverageThreshold,
    /// Fail on low coverage
    pub check_coverage: bool,
}

/// Merge command-line flags over the project configuration
pub fn resolve_pipeline(project: &ProjectConfig, args: &PipelineArgs) -> CliResult<PipelineSettings> {
    let tests = if args.classes.is_empty() {
        project.tests.clone()
    } else {
        args.classes.iter().map(RunTest::new).collect()
    };

    let layout = args
        .output
        .as_ref()
        .map_or_else(|| project.layout(), ReportLayout::new);

    let threshold = match args.threshold {
        Some(percent) => parse_threshold(percent)?,
        None => project.threshold,
    };

    Ok(PipelineSettings {
        tests,
        layout,
        threshold,
        check_coverage: project.fail_on_low_coverage && !args.no_coverage_check,
    })
}

/// Validate a threshold flag
pub fn parse_threshold(percent: u8) -> CliResult<CoverageThreshold> {
    CoverageThreshold::new(percent).map_err(|e| CliError::invalid_argument(e.to_string()))
}

/// Scan sources, execute the task, and report the outcome
pub fn execute_pipeline(
    config: &CliConfig,
    project: &ProjectConfig,
    settings: PipelineSettings,
    service: &dyn TestRunService,
    spinner_message: &str,
) -> CliResult<TaskOutcome> {
    let mut reporter =
        ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());

    let sources = ProjectSources::scan(&project.src_dir)?;
    if config.verbosity.is_verbose() {
        reporter.info(&format!(
            "{} classes, {} triggers in {}",
            sources.classes().len(),
            sources.triggers().len(),
            sources.src_dir().display()
        ));
    }

    let task = TestTask::new(service, sources.known_names())
        .with_tests(settings.tests)
        .with_layout(settings.layout)
        .with_threshold(settings.threshold)
        .with_coverage_check(settings.check_coverage);

    reporter.start_spinner(spinner_message);
    let outcome = task.execute();
    reporter.finish_spinner();
    let outcome = outcome?;

    reporter.files(&outcome.files);
    for warning in pipeline_warnings(&outcome.report) {
        reporter.warning(&warning);
    }
    reporter.summary(&outcome.report, settings.threshold);
    conclude(&reporter, &outcome.verdict)?;
    Ok(outcome)
}

/// Suspicious but non-fatal report contents
#[must_use]
pub fn pipeline_warnings(report: &CoverageReport) -> Vec<String> {
    let mut warnings = Vec::new();
    if report.classes().is_empty() {
        warnings.push("No coverage recorded for project classes".to_string());
    }
    if report.methods().is_empty() {
        warnings.push("No test results returned".to_string());
    }
    warnings
}

/// Print the verdict; a failing verdict becomes an error
pub fn conclude(reporter: &ProgressReporter, verdict: &Verdict) -> CliResult<()> {
    match verdict {
        Verdict::Passed => {
            reporter.success(&verdict.summary());
            Ok(())
        }
        Verdict::TestsFailed(_) => {
            reporter.failure("Test failures");
            Err(CliError::verdict(verdict.summary()))
        }
        Verdict::LowCoverage(_) => {
            reporter.failure("Coverage below threshold");
            Err(CliError::verdict(verdict.summary()))
        }
    }
}
