//! Apexcov: Apex test-run coverage reporting
//!
//! Runs Apex test classes on an org (or replays a saved run), joins the
//! returned coverage against the project's own classes and triggers, and
//! writes an HTML report with an XML snapshot that can regenerate it later.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                       APEXCOV Pipeline                            │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌────────────┐   ┌────────────┐   ┌─────────┐ │
//! │  │ TestRun     │   │ Coverage   │   │ Html/Xml   │   │ Verdict │ │
//! │  │ Service     │──►│ Report     │──►│ Report     │──►│         │ │
//! │  │ (remote/json)│  │ (aggregate)│   │ Writer     │   │         │ │
//! │  └─────────────┘   └────────────┘   └────────────┘   └─────────┘ │
//! │         ▲                ▲                                        │
//! │    run list        ProjectSources (classes/*.cls, triggers/*)     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use apexcov::{JsonFileService, ProjectSources, ReportLayout, RunTest, TestTask};
//!
//! # fn main() -> apexcov::ReportResult<()> {
//! let sources = ProjectSources::scan("src")?;
//! let service = JsonFileService::new("run-result.json");
//! let outcome = TestTask::new(&service, sources.known_names())
//!     .with_test(RunTest::new("FooTest"))
//!     .with_layout(ReportLayout::new("reports"))
//!     .execute()?;
//! println!("{}", outcome.verdict.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Per-class coverage and the coverage threshold
pub mod coverage;

/// HTML rendering
#[allow(clippy::format_push_string)]
pub mod html;

/// Project source scanning
pub mod project;

/// Tooling REST API client
#[cfg(feature = "remote")]
pub mod remote;

/// Report aggregation
pub mod report;

mod result;

/// Raw run results and the test run service
pub mod run;

/// Test run task
pub mod task;

/// Per-method test outcome
pub mod test_element;

/// Build-step verdict
pub mod verdict;

/// Report file layout and writing
pub mod writer;

/// XML snapshot
pub mod xml;

pub use coverage::{CoverageElement, CoverageLevel, CoverageThreshold, DEFAULT_COVERAGE_THRESHOLD};
pub use html::HtmlFormatter;
pub use project::{ProjectSources, SourceKind};
#[cfg(feature = "remote")]
pub use remote::{ToolingApiService, DEFAULT_API_VERSION};
pub use report::{ClassGroup, CoverageReport};
pub use result::{ReportError, ReportResult};
pub use run::{
    CodeCoverageRecord, JsonFileService, RunTestsResult, TestFailureRecord, TestRunService,
    TestSuccessRecord,
};
pub use task::{RunTest, TaskOutcome, TestTask};
pub use test_element::TestElement;
pub use verdict::{FailedTest, LowCoverage, Verdict};
pub use writer::{ReportLayout, ReportWriter, WrittenFiles};
