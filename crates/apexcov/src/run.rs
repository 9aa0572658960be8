//! Raw remote test-run results and the service that produces them.
//!
//! Field names follow the Tooling API `RunTestsResult` JSON shape, so a saved
//! response body can be replayed through [`JsonFileService`] without touching
//! the network.

use crate::result::{ReportError, ReportResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Coverage of one class/trigger as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeCoverageRecord {
    /// Class or trigger name
    pub name: String,
    /// Executable locations
    #[serde(default)]
    pub num_locations: u32,
    /// Locations not exercised by any test
    #[serde(default)]
    pub num_locations_not_covered: u32,
}

impl CodeCoverageRecord {
    /// Create a coverage record
    #[must_use]
    pub fn new(name: impl Into<String>, num_locations: u32, not_covered: u32) -> Self {
        Self {
            name: name.into(),
            num_locations,
            num_locations_not_covered: not_covered,
        }
    }
}

/// A failed test method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestFailureRecord {
    /// Test class name
    pub name: String,
    /// Test method name
    pub method_name: String,
    /// Failure message
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    /// Stack trace
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stack_trace: String,
    /// Execution time
    #[serde(default)]
    pub time: f64,
    /// Whether the test ran with access to organization data
    #[serde(default)]
    pub see_all_data: bool,
}

impl TestFailureRecord {
    /// Create a failure record
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        method_name: impl Into<String>,
        time: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            method_name: method_name.into(),
            message: message.into(),
            stack_trace: String::new(),
            time,
            see_all_data: false,
        }
    }

    /// Set the stack trace
    #[must_use]
    pub fn with_stack_trace(mut self, trace: impl Into<String>) -> Self {
        self.stack_trace = trace.into();
        self
    }

    /// Set the see-all-data flag
    #[must_use]
    pub const fn with_see_all_data(mut self, see_all_data: bool) -> Self {
        self.see_all_data = see_all_data;
        self
    }
}

/// A passed test method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuccessRecord {
    /// Test class name
    pub name: String,
    /// Test method name
    pub method_name: String,
    /// Execution time
    #[serde(default)]
    pub time: f64,
    /// Whether the test ran with access to organization data
    #[serde(default)]
    pub see_all_data: bool,
}

impl TestSuccessRecord {
    /// Create a success record
    #[must_use]
    pub fn new(name: impl Into<String>, method_name: impl Into<String>, time: f64) -> Self {
        Self {
            name: name.into(),
            method_name: method_name.into(),
            time,
            see_all_data: false,
        }
    }

    /// Set the see-all-data flag
    #[must_use]
    pub const fn with_see_all_data(mut self, see_all_data: bool) -> Self {
        self.see_all_data = see_all_data;
        self
    }
}

/// Everything one remote test run returns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTestsResult {
    /// Per-class coverage
    #[serde(default)]
    pub code_coverage: Vec<CodeCoverageRecord>,
    /// Failed methods
    #[serde(default)]
    pub failures: Vec<TestFailureRecord>,
    /// Passed methods
    #[serde(default)]
    pub successes: Vec<TestSuccessRecord>,
    /// Number of methods executed
    #[serde(default)]
    pub num_tests_run: u32,
    /// Number of failed methods
    #[serde(default)]
    pub num_failures: u32,
    /// Total execution time reported by the platform
    #[serde(default)]
    pub total_time: f64,
}

impl RunTestsResult {
    /// Create an empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coverage record
    #[must_use]
    pub fn with_coverage(mut self, record: CodeCoverageRecord) -> Self {
        self.code_coverage.push(record);
        self
    }

    /// Add a failure record
    #[must_use]
    pub fn with_failure(mut self, record: TestFailureRecord) -> Self {
        self.num_failures += 1;
        self.num_tests_run += 1;
        self.failures.push(record);
        self
    }

    /// Add a success record
    #[must_use]
    pub fn with_success(mut self, record: TestSuccessRecord) -> Self {
        self.num_tests_run += 1;
        self.successes.push(record);
        self
    }

    /// Parse a saved response body
    ///
    /// # Errors
    ///
    /// Returns error if the JSON does not match the result shape
    pub fn from_json(json: &str) -> ReportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize for later replay
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The platform sends `null` for absent diagnostics
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Capability to run test classes on the platform
///
/// One blocking call per run; implementations do not retry.
pub trait TestRunService {
    /// Run the given test classes and return all raw records
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Remote`] if the run could not be completed
    fn run_tests(&self, class_names: &[String]) -> ReportResult<RunTestsResult>;
}

/// Replays a previously saved run result from disk
#[derive(Debug, Clone)]
pub struct JsonFileService {
    path: PathBuf,
}

impl JsonFileService {
    /// Create a service reading from `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the saved result
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TestRunService for JsonFileService {
    fn run_tests(&self, class_names: &[String]) -> ReportResult<RunTestsResult> {
        info!(
            path = %self.path.display(),
            classes = class_names.len(),
            "replaying saved test run"
        );
        let json =
            std::fs::read_to_string(&self.path).map_err(|e| ReportError::file(&self.path, e))?;
        RunTestsResult::from_json(&json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "numTestsRun": 2,
        "numFailures": 1,
        "totalTime": 2000.0,
        "codeCoverage": [
            {"id": "01p", "name": "Foo", "namespace": null, "numLocations": 10,
             "numLocationsNotCovered": 2, "type": "Class", "locationsNotCovered": []}
        ],
        "failures": [
            {"id": "01p", "name": "FooTest", "methodName": "testA", "message": "boom",
             "stackTrace": "Class.FooTest.testA: line 4", "time": 1.2, "seeAllData": false,
             "type": "Class"}
        ],
        "successes": [
            {"id": "01p", "name": "FooTest", "methodName": "testB", "time": 0.8, "seeAllData": true}
        ]
    }"#;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_tooling_api_shape() {
            let result = RunTestsResult::from_json(SAMPLE).unwrap();
            assert_eq!(result.num_tests_run, 2);
            assert_eq!(result.code_coverage.len(), 1);
            assert_eq!(result.code_coverage[0].num_locations_not_covered, 2);
            assert_eq!(result.failures[0].message, "boom");
            assert!(result.successes[0].see_all_data);
        }

        #[test]
        fn test_missing_arrays_default_to_empty() {
            let result = RunTestsResult::from_json("{}").unwrap();
            assert!(result.code_coverage.is_empty());
            assert!(result.failures.is_empty());
            assert!(result.successes.is_empty());
        }

        #[test]
        fn test_null_diagnostics_become_empty() {
            let json = r#"{"failures": [{"name": "T", "methodName": "m",
                "message": null, "stackTrace": null, "time": 0.0}]}"#;
            let result = RunTestsResult::from_json(json).unwrap();
            assert_eq!(result.failures[0].message, "");
            assert_eq!(result.failures[0].stack_trace, "");
        }

        #[test]
        fn test_malformed_json_is_error() {
            assert!(RunTestsResult::from_json("{\"failures\": 3}").is_err());
        }
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_builder_counts() {
            let result = RunTestsResult::new()
                .with_failure(TestFailureRecord::new("T", "a", 0.1, "x"))
                .with_success(TestSuccessRecord::new("T", "b", 0.2));
            assert_eq!(result.num_tests_run, 2);
            assert_eq!(result.num_failures, 1);
        }

        #[test]
        fn test_failure_builder() {
            let record = TestFailureRecord::new("T", "a", 0.5, "msg")
                .with_stack_trace("line 1")
                .with_see_all_data(true);
            assert_eq!(record.stack_trace, "line 1");
            assert!(record.see_all_data);
        }
    }

    mod json_file_service_tests {
        use super::*;

        #[test]
        fn test_replay_saved_result() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("run.json");
            std::fs::write(&path, SAMPLE).unwrap();

            let service = JsonFileService::new(&path);
            let result = service.run_tests(&["FooTest".to_string()]).unwrap();
            assert_eq!(result.failures.len(), 1);
            assert_eq!(result.successes.len(), 1);
        }

        #[test]
        fn test_missing_file_reports_path() {
            let service = JsonFileService::new("/nonexistent/run.json");
            let err = service.run_tests(&[]).unwrap_err();
            assert!(err.to_string().contains("/nonexistent/run.json"));
        }

        #[test]
        fn test_json_round_trip() {
            let original = RunTestsResult::new()
                .with_coverage(CodeCoverageRecord::new("Foo", 3, 1))
                .with_success(TestSuccessRecord::new("FooTest", "testOk", 0.4));
            let json = original.to_json().unwrap();
            assert_eq!(RunTestsResult::from_json(&json).unwrap(), original);
        }
    }
}
