//! Build-step verdict
//!
//! The report is always written in full; the verdict only decides whether the
//! calling step should fail. Failed tests take precedence over low coverage.

use crate::coverage::CoverageThreshold;
use crate::html::format_percent;
use crate::report::CoverageReport;
use std::fmt::Write;

/// Decision for the calling build step
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// All tests passed and coverage met the threshold
    Passed,
    /// One or more test methods failed
    TestsFailed(Vec<FailedTest>),
    /// Tests passed but some classes are below the threshold
    LowCoverage(Vec<LowCoverage>),
}

/// A failed method, as listed in the verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTest {
    /// Test class name
    pub class_name: String,
    /// Test method name
    pub method_name: String,
    /// Failure message
    pub message: String,
    /// Stack trace
    pub stack_trace: String,
}

/// A class below the coverage threshold
#[derive(Debug, Clone, PartialEq)]
pub struct LowCoverage {
    /// Class or trigger name
    pub class_name: String,
    /// Coverage percent
    pub percent: f64,
}

impl Verdict {
    /// Evaluate a report
    ///
    /// With `check_coverage` off, only test failures fail the step.
    #[must_use]
    pub fn evaluate(
        report: &CoverageReport,
        threshold: CoverageThreshold,
        check_coverage: bool,
    ) -> Self {
        let failed: Vec<FailedTest> = report
            .test_groups()
            .iter()
            .flat_map(|group| group.methods().iter())
            .filter(|m| m.is_fail())
            .map(|m| FailedTest {
                class_name: m.class_name().to_string(),
                method_name: m.method_name().to_string(),
                message: m.fail_message().unwrap_or_default().to_string(),
                stack_trace: m.stack_trace().unwrap_or_default().to_string(),
            })
            .collect();
        if !failed.is_empty() {
            return Self::TestsFailed(failed);
        }

        if check_coverage {
            let low: Vec<LowCoverage> = report
                .low_coverage(threshold)
                .into_iter()
                .map(|c| LowCoverage {
                    class_name: c.class_name().to_string(),
                    percent: c.coverage_percent(),
                })
                .collect();
            if !low.is_empty() {
                return Self::LowCoverage(low);
            }
        }

        Self::Passed
    }

    /// Check if the step passes
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Enumerated description of what failed
    #[must_use]
    pub fn summary(&self) -> String {
        let mut text = String::new();
        match self {
            Self::Passed => text.push_str("All tests passed"),
            Self::TestsFailed(failed) => {
                let _ = writeln!(text, "{} test(s) failed:", failed.len());
                for (i, test) in failed.iter().enumerate() {
                    let _ = write!(
                        text,
                        "\n{}. {}.{}:\nError message: {}\n",
                        i + 1,
                        test.class_name,
                        test.method_name,
                        test.message
                    );
                    if !test.stack_trace.is_empty() {
                        let _ = writeln!(text, "{}", test.stack_trace);
                    }
                }
            }
            Self::LowCoverage(low) => {
                let _ = writeln!(text, "{} class(es) below coverage threshold:", low.len());
                for (i, class) in low.iter().enumerate() {
                    let _ = write!(
                        text,
                        "\n{}. {}: {}%",
                        i + 1,
                        class.class_name,
                        format_percent(Some(class.percent))
                    );
                }
                text.push('\n');
            }
        }
        text
    }
}
