//! Report command handler

use crate::commands::ReportArgs;
use crate::config::{CliConfig, ProjectConfig};
use crate::error::CliResult;
use crate::handlers::parse_threshold;
use crate::output::ProgressReporter;
use apexcov::{xml, ReportLayout, ReportWriter, WrittenFiles};
use std::path::Path;

/// Execute the report command
///
/// The HTML is regenerated from the snapshot alone; the org is never
/// contacted and nothing is recomputed.
pub fn execute_report(
    config: &CliConfig,
    project: &ProjectConfig,
    args: &ReportArgs,
) -> CliResult<WrittenFiles> {
    let reporter = ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());

    let report = xml::load(&args.xml)?;
    let threshold = match args.threshold {
        Some(percent) => parse_threshold(percent)?,
        None => project.threshold,
    };
    let layout = report_layout(&args.xml, args.output.as_deref());

    let files = ReportWriter::new(layout)
        .with_threshold(threshold)
        .write_html(&report)?;
    reporter.files(&files);
    reporter.summary(&report, threshold);
    Ok(files)
}

/// Output next to the snapshot unless a directory is given
#[must_use]
pub fn report_layout(xml_path: &Path, output: Option<&Path>) -> ReportLayout {
    let dir = output
        .or_else(|| xml_path.parent())
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    ReportLayout::new(dir)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Verbosity;
    use crate::error::CliError;
    use apexcov::{CodeCoverageRecord, CoverageReport, RunTestsResult, TestSuccessRecord};
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn quiet() -> CliConfig {
        CliConfig::new().with_verbosity(Verbosity::Quiet)
    }

    #[test]
    fn test_layout_defaults_to_snapshot_dir() {
        let layout = report_layout(Path::new("out/coverage-report.xml"), None);
        assert_eq!(layout.output_dir, PathBuf::from("out"));

        let layout = report_layout(Path::new("coverage-report.xml"), None);
        assert_eq!(layout.output_dir, PathBuf::from("."));

        let layout = report_layout(Path::new("out/x.xml"), Some(Path::new("html")));
        assert_eq!(layout.output_dir, PathBuf::from("html"));
    }

    #[test]
    fn test_regenerate_from_snapshot() {
        let temp = TempDir::new().unwrap();
        let known: BTreeSet<String> = std::iter::once("Foo".to_string()).collect();
        let report = CoverageReport::aggregate(
            &known,
            &RunTestsResult::new()
                .with_coverage(CodeCoverageRecord::new("Foo", 4, 1))
                .with_success(TestSuccessRecord::new("FooTest", "testA", 0.25)),
        );
        let xml_path = temp.path().join("snapshot.xml");
        std::fs::write(&xml_path, xml::to_xml(&report).unwrap()).unwrap();

        let args = ReportArgs {
            xml: xml_path,
            output: Some(temp.path().join("html")),
            threshold: None,
        };
        let files = execute_report(&quiet(), &ProjectConfig::default(), &args).unwrap();

        let html = std::fs::read_to_string(files.html.unwrap()).unwrap();
        assert!(html.contains("3 / 4"));
        assert!(html.contains("testA"));
        assert!(files.xml.is_none());
    }

    #[test]
    fn test_invalid_snapshot() {
        let temp = TempDir::new().unwrap();
        let xml_path = temp.path().join("broken.xml");
        std::fs::write(&xml_path, "<coverageReport><fail>x</fail></coverageReport>").unwrap();
        let args = ReportArgs {
            xml: xml_path,
            output: None,
            threshold: None,
        };
        let err = execute_report(&quiet(), &ProjectConfig::default(), &args).unwrap_err();
        assert!(matches!(err, CliError::Report(_)));
    }
}
