//! Test run task
//!
//! Drives one complete run: call the service, aggregate, write the report
//! files, then evaluate the verdict. A service error aborts the task before
//! anything is written.

use crate::coverage::CoverageThreshold;
use crate::report::CoverageReport;
use crate::result::{ReportError, ReportResult};
use crate::run::TestRunService;
use crate::verdict::Verdict;
use crate::writer::{ReportLayout, ReportWriter, WrittenFiles};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// A test class requested for the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTest {
    /// Test class name
    pub class_name: String,
    /// Whether to run it; `false` keeps the entry listed but skipped
    #[serde(default = "default_run")]
    pub run: bool,
}

const fn default_run() -> bool {
    true
}

impl RunTest {
    /// A test class that will be run
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            run: true,
        }
    }

    /// A test class that is listed but skipped
    #[must_use]
    pub fn skipped(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            run: false,
        }
    }
}

/// Result of a completed task
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    /// Aggregated report
    pub report: CoverageReport,
    /// Build-step decision
    pub verdict: Verdict,
    /// Files written
    pub files: WrittenFiles,
}

/// One test run with report generation
pub struct TestTask<'a> {
    service: &'a dyn TestRunService,
    known_classes: BTreeSet<String>,
    tests: Vec<RunTest>,
    layout: ReportLayout,
    threshold: CoverageThreshold,
    check_coverage: bool,
}

impl std::fmt::Debug for TestTask<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestTask")
            .field("known_classes", &self.known_classes.len())
            .field("tests", &self.tests)
            .field("layout", &self.layout)
            .field("threshold", &self.threshold)
            .field("check_coverage", &self.check_coverage)
            .finish_non_exhaustive()
    }
}

impl<'a> TestTask<'a> {
    /// Create a task against a service and the project's known names
    #[must_use]
    pub fn new(service: &'a dyn TestRunService, known_classes: BTreeSet<String>) -> Self {
        Self {
            service,
            known_classes,
            tests: Vec::new(),
            layout: ReportLayout::default(),
            threshold: CoverageThreshold::default(),
            check_coverage: true,
        }
    }

    /// Add a requested test class
    #[must_use]
    pub fn with_test(mut self, test: RunTest) -> Self {
        self.tests.push(test);
        self
    }

    /// Add several requested test classes
    #[must_use]
    pub fn with_tests(mut self, tests: impl IntoIterator<Item = RunTest>) -> Self {
        self.tests.extend(tests);
        self
    }

    /// Set the output layout
    #[must_use]
    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the coverage threshold
    #[must_use]
    pub const fn with_threshold(mut self, threshold: CoverageThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable or disable failing on low coverage
    #[must_use]
    pub const fn with_coverage_check(mut self, enabled: bool) -> Self {
        self.check_coverage = enabled;
        self
    }

    /// Test classes that will actually run
    #[must_use]
    pub fn run_list(&self) -> Vec<String> {
        self.tests
            .iter()
            .filter(|t| t.run)
            .map(|t| t.class_name.clone())
            .collect()
    }

    /// Run the tests and write the report
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no test class is enabled, or any
    /// service or write error
    pub fn execute(&self) -> ReportResult<TaskOutcome> {
        let run_list = self.run_list();
        if run_list.is_empty() {
            return Err(ReportError::config("no test classes to run"));
        }
        for test in self.tests.iter().filter(|t| !t.run) {
            debug!(class = %test.class_name, "skipping test class");
        }
        info!(classes = ?run_list, "running test classes");

        let result = self.service.run_tests(&run_list)?;
        info!(
            tests = result.num_tests_run,
            failures = result.num_failures,
            "test run finished"
        );

        let report = CoverageReport::aggregate(&self.known_classes, &result);
        let files = ReportWriter::new(self.layout.clone())
            .with_threshold(self.threshold)
            .write_all(&report)?;
        let verdict = Verdict::evaluate(&report, self.threshold, self.check_coverage);

        Ok(TaskOutcome {
            report,
            verdict,
            files,
        })
    }
}
