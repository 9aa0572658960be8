//! One test method's outcome.

use crate::run::{TestFailureRecord, TestSuccessRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Outcome of a single test method
///
/// Ordering compares method names only, so sorting a class's methods with a
/// stable sort keeps insertion order for equal names.
///
/// Names and diagnostics are XML attributes: element text is trimmed on
/// read, attribute values are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestElement {
    #[serde(rename = "@className")]
    class_name: String,
    #[serde(rename = "@methodName")]
    method_name: String,
    #[serde(rename = "@failMessage", default, skip_serializing_if = "Option::is_none")]
    fail_message: Option<String>,
    #[serde(rename = "@stackTrace", default, skip_serializing_if = "Option::is_none")]
    stack_trace: Option<String>,
    duration: f64,
    is_fail: bool,
    #[serde(default)]
    see_all_data: bool,
}

impl TestElement {
    /// Build from a failure record
    #[must_use]
    pub fn from_failure(record: &TestFailureRecord) -> Self {
        Self {
            class_name: record.name.clone(),
            method_name: record.method_name.clone(),
            duration: record.time,
            is_fail: true,
            fail_message: non_empty(&record.message),
            stack_trace: non_empty(&record.stack_trace),
            see_all_data: record.see_all_data,
        }
    }

    /// Build from a success record
    #[must_use]
    pub fn from_success(record: &TestSuccessRecord) -> Self {
        Self {
            class_name: record.name.clone(),
            method_name: record.method_name.clone(),
            duration: record.time,
            is_fail: false,
            fail_message: None,
            stack_trace: None,
            see_all_data: record.see_all_data,
        }
    }

    /// Test class name
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Test method name
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Execution time
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Check if the method failed
    #[must_use]
    pub const fn is_fail(&self) -> bool {
        self.is_fail
    }

    /// Failure message, only present for failures
    #[must_use]
    pub fn fail_message(&self) -> Option<&str> {
        self.fail_message.as_deref()
    }

    /// Stack trace, only present for failures
    #[must_use]
    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    /// Whether the test ran with access to organization data
    #[must_use]
    pub const fn see_all_data(&self) -> bool {
        self.see_all_data
    }

    /// Compare by method name
    #[must_use]
    pub fn cmp_by_method(&self, other: &Self) -> Ordering {
        self.method_name.cmp(&other.method_name)
    }
}

/// An empty attribute reads back as absent, so store it that way
fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
