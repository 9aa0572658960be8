//! XML snapshot of a coverage report
//!
//! The snapshot holds every computed value (percentages, totals, counts) so
//! that the HTML report can be regenerated later without another test run.
//! Names and failure text are attributes so surrounding whitespace survives
//! a round trip.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <coverageReport>
//!   <generated>2026-01-01T12:00:00+00:00</generated>
//!   <totalLines>10</totalLines>
//!   <totalCoverageLines>8</totalCoverageLines>
//!   <totalPercent>80</totalPercent>
//!   <fail>1</fail>
//!   <success>1</success>
//!   <classes className="Foo">
//!     <totalLines>10</totalLines>
//!     <coverageLines>8</coverageLines>
//!     <coveragePercent>80</coveragePercent>
//!   </classes>
//!   <methods className="FooTest" methodName="testA" failMessage="..." stackTrace="...">
//!     <duration>1.2</duration>
//!     <isFail>true</isFail>
//!     ...
//!   </methods>
//! </coverageReport>
//! ```

use crate::report::CoverageReport;
use crate::result::{ReportError, ReportResult};
use quick_xml::se::Serializer;
use serde::Serialize;
use std::path::Path;

/// Root element name
pub const ROOT_ELEMENT: &str = "coverageReport";

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Serialize a report as an indented XML document
///
/// # Errors
///
/// Returns error if serialization fails
pub fn to_xml(report: &CoverageReport) -> ReportResult<String> {
    let mut body = String::new();
    let mut serializer = Serializer::with_root(&mut body, Some(ROOT_ELEMENT))
        .map_err(|e| ReportError::xml(e.to_string()))?;
    serializer.indent(' ', 2);
    report
        .serialize(serializer)
        .map_err(|e| ReportError::xml(e.to_string()))?;

    let mut xml = String::with_capacity(DECLARATION.len() + body.len() + 2);
    xml.push_str(DECLARATION);
    xml.push('\n');
    xml.push_str(&body);
    xml.push('\n');
    Ok(xml)
}

/// Parse a report from its XML snapshot
///
/// # Errors
///
/// Returns error if the document is not a coverage report
pub fn from_xml(xml: &str) -> ReportResult<CoverageReport> {
    quick_xml::de::from_str(xml).map_err(|e| ReportError::xml(e.to_string()))
}

/// Load a report snapshot from disk
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed
pub fn load(path: &Path) -> ReportResult<CoverageReport> {
    let xml = std::fs::read_to_string(path).map_err(|e| ReportError::file(path, e))?;
    from_xml(&xml)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::run::{CodeCoverageRecord, RunTestsResult, TestFailureRecord, TestSuccessRecord};
    use std::collections::BTreeSet;

    fn sample_report() -> CoverageReport {
        let known: BTreeSet<String> = ["Foo", "Bar", "Quux"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let result = RunTestsResult::new()
            .with_coverage(CodeCoverageRecord::new("Foo", 3, 1))
            .with_coverage(CodeCoverageRecord::new("Bar", 0, 0))
            .with_coverage(CodeCoverageRecord::new("Quux", 7, 2))
            .with_failure(
                TestFailureRecord::new("FooTest", "testA", 1.2, "expected <1> & got \"2\"")
                    .with_stack_trace("Class.FooTest.testA: line 4\nClass.Foo.run: line 9"),
            )
            .with_success(TestSuccessRecord::new("FooTest", "testB", 0.1).with_see_all_data(true))
            .with_success(TestSuccessRecord::new("BarTest", "testC", 0.30000000000000004));
        CoverageReport::aggregate(&known, &result)
    }

    #[test]
    fn test_document_shape() {
        let xml = to_xml(&sample_report()).unwrap();
        assert!(xml.starts_with(DECLARATION));
        assert!(xml.contains("<coverageReport>"));
        assert!(xml.contains("<classes className=\"Foo\">"));
        assert!(xml.contains("<methods className=\"FooTest\" methodName=\"testB\">"));
        assert!(xml.contains("<totalLines>10</totalLines>"));
        assert!(xml.contains("<isFail>true</isFail>"));
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let report = sample_report();
        let parsed = from_xml(&to_xml(&report).unwrap()).unwrap();

        assert_eq!(parsed, report);
        assert_eq!(parsed.total_percent(), report.total_percent());
        assert_eq!(parsed.classes(), report.classes());
        assert_eq!(parsed.methods(), report.methods());
        assert_eq!(
            parsed.methods()[1].fail_message(),
            Some("expected <1> & got \"2\"")
        );
    }

    #[test]
    fn test_round_trip_keeps_surrounding_whitespace() {
        let known: BTreeSet<String> = std::iter::once(" Padded ".to_string()).collect();
        let result = RunTestsResult::new()
            .with_coverage(CodeCoverageRecord::new(" Padded ", 4, 1))
            .with_failure(
                TestFailureRecord::new("FooTest ", "testA", 0.5, "  padded  ")
                    .with_stack_trace("line 1\n"),
            )
            .with_success(TestSuccessRecord::new("FooTest", " m", 0.1));
        let report = CoverageReport::aggregate(&known, &result);

        let parsed = from_xml(&to_xml(&report).unwrap()).unwrap();

        assert_eq!(parsed, report);
        assert_eq!(parsed.classes()[0].class_name(), " Padded ");
        let failure = parsed.methods().iter().find(|m| m.is_fail()).unwrap();
        assert_eq!(failure.class_name(), "FooTest ");
        assert_eq!(failure.fail_message(), Some("  padded  "));
        assert_eq!(failure.stack_trace(), Some("line 1\n"));
        assert!(parsed.methods().iter().any(|m| m.method_name() == " m"));
    }

    #[test]
    fn test_values_are_not_recomputed() {
        let xml = to_xml(&sample_report()).unwrap().replace(
            "<totalCoverageLines>7</totalCoverageLines>",
            "<totalCoverageLines>5</totalCoverageLines>",
        );
        let parsed = from_xml(&xml).unwrap();
        assert_eq!(parsed.total_coverage_lines(), 5);
        assert_eq!(parsed.total_lines(), 10);
    }

    #[test]
    fn test_round_trip_without_total_percent() {
        let report = CoverageReport::aggregate(&BTreeSet::new(), &RunTestsResult::new());
        let xml = to_xml(&report).unwrap();
        assert!(!xml.contains("totalPercent"));

        let parsed = from_xml(&xml).unwrap();
        assert!(parsed.total_percent().is_none());
        assert!(parsed.classes().is_empty());
        assert!(parsed.methods().is_empty());
    }

    #[test]
    fn test_invalid_document() {
        let err = from_xml("<coverageReport><totalLines>many</totalLines></coverageReport>")
            .unwrap_err();
        assert!(matches!(err, ReportError::Xml { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/coverage-report.xml")).unwrap_err();
        assert!(matches!(err, ReportError::File { .. }));
    }
}
