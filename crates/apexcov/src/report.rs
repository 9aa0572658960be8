//! Report aggregation
//!
//! Joins the raw arrays of one test run against the project's known
//! class/trigger names and produces the in-memory [`CoverageReport`].
//!
//! ```text
//! RunTestsResult ──► filter by known names ──► sort by class ──► totals
//!        │
//!        └──► failures + successes ──► group by test class ──► sort by method
//! ```
//!
//! The report is also the XML snapshot model: every computed value is a stored
//! field, so a report loaded from XML renders identically without recomputing.

use crate::coverage::{CoverageElement, CoverageThreshold};
use crate::run::RunTestsResult;
use crate::test_element::TestElement;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Aggregated results of one test run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// RFC 3339 time the report was aggregated
    #[serde(default)]
    generated: String,
    #[serde(default)]
    total_lines: u64,
    #[serde(default)]
    total_coverage_lines: u64,
    /// Absent when no filtered class has executable locations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_percent: Option<f64>,
    #[serde(default)]
    fail: u64,
    #[serde(default)]
    success: u64,
    #[serde(default, rename = "classes")]
    classes: Vec<CoverageElement>,
    #[serde(default, rename = "methods")]
    methods: Vec<TestElement>,
}

impl CoverageReport {
    /// Aggregate a run against the known project class/trigger names
    ///
    /// Coverage for names outside `known_classes` is dropped before totals are
    /// computed. Test methods are kept regardless of their class name.
    #[must_use]
    pub fn aggregate(known_classes: &BTreeSet<String>, result: &RunTestsResult) -> Self {
        let mut classes: Vec<CoverageElement> = result
            .code_coverage
            .iter()
            .filter(|record| {
                let known = known_classes.contains(&record.name);
                if !known {
                    debug!(name = %record.name, "skipping coverage for class outside project");
                }
                known
            })
            .map(CoverageElement::from_record)
            .collect();
        classes.sort_by(|a, b| a.class_name().cmp(b.class_name()));

        let total_lines: u64 = classes.iter().map(|c| u64::from(c.total_lines())).sum();
        let total_coverage_lines: u64 = classes
            .iter()
            .map(|c| u64::from(c.coverage_lines()))
            .sum();

        Self {
            generated: chrono::Local::now().to_rfc3339(),
            total_lines,
            total_coverage_lines,
            total_percent: total_percent(total_coverage_lines, total_lines),
            fail: result.failures.len() as u64,
            success: result.successes.len() as u64,
            classes,
            methods: group_methods(result),
        }
    }

    /// Set the generated timestamp
    #[must_use]
    pub fn with_generated(mut self, generated: impl Into<String>) -> Self {
        self.generated = generated.into();
        self
    }

    /// RFC 3339 time the report was aggregated
    #[must_use]
    pub fn generated(&self) -> &str {
        &self.generated
    }

    /// Covered classes/triggers, sorted by name
    #[must_use]
    pub fn classes(&self) -> &[CoverageElement] {
        &self.classes
    }

    /// Test methods in class-group order
    #[must_use]
    pub fn methods(&self) -> &[TestElement] {
        &self.methods
    }

    /// Sum of executable locations over the reported classes
    #[must_use]
    pub const fn total_lines(&self) -> u64 {
        self.total_lines
    }

    /// Sum of covered locations over the reported classes
    #[must_use]
    pub const fn total_coverage_lines(&self) -> u64 {
        self.total_coverage_lines
    }

    /// Overall coverage percent, `None` when there is nothing to cover
    #[must_use]
    pub const fn total_percent(&self) -> Option<f64> {
        self.total_percent
    }

    /// Number of failed methods
    #[must_use]
    pub const fn fail_count(&self) -> u64 {
        self.fail
    }

    /// Number of passed methods
    #[must_use]
    pub const fn success_count(&self) -> u64 {
        self.success
    }

    /// Check if every test method passed
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.fail == 0
    }

    /// Classes below the threshold
    #[must_use]
    pub fn low_coverage(&self, threshold: CoverageThreshold) -> Vec<&CoverageElement> {
        self.classes
            .iter()
            .filter(|c| c.level(threshold).is_low())
            .collect()
    }

    /// Test methods grouped by class, in ascending class order
    #[must_use]
    pub fn test_groups(&self) -> Vec<ClassGroup<'_>> {
        let mut groups: BTreeMap<&str, Vec<&TestElement>> = BTreeMap::new();
        for method in &self.methods {
            groups.entry(method.class_name()).or_default().push(method);
        }

        groups
            .into_iter()
            .map(|(class_name, mut methods)| {
                methods.sort_by(|a, b| a.cmp_by_method(b));
                ClassGroup::new(class_name, methods)
            })
            .collect()
    }
}

/// Test methods of one class
#[derive(Debug, Clone)]
pub struct ClassGroup<'a> {
    class_name: &'a str,
    methods: Vec<&'a TestElement>,
    failing: bool,
    duration: f64,
}

impl<'a> ClassGroup<'a> {
    fn new(class_name: &'a str, methods: Vec<&'a TestElement>) -> Self {
        let failing = methods.iter().any(|m| m.is_fail());
        let duration = methods.iter().map(|m| m.duration()).sum();
        Self {
            class_name,
            methods,
            failing,
            duration,
        }
    }

    /// Test class name
    #[must_use]
    pub const fn class_name(&self) -> &'a str {
        self.class_name
    }

    /// Methods sorted by name
    #[must_use]
    pub fn methods(&self) -> &[&'a TestElement] {
        &self.methods
    }

    /// Check if any method failed
    #[must_use]
    pub const fn is_failing(&self) -> bool {
        self.failing
    }

    /// Sum of method durations
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }
}

fn total_percent(covered: u64, total: u64) -> Option<f64> {
    (total > 0).then(|| 100.0 * covered as f64 / total as f64)
}

/// Failures first, then successes, stable-sorted by method within each class
fn group_methods(result: &RunTestsResult) -> Vec<TestElement> {
    let mut by_class: BTreeMap<&str, Vec<TestElement>> = BTreeMap::new();
    for failure in &result.failures {
        by_class
            .entry(failure.name.as_str())
            .or_default()
            .push(TestElement::from_failure(failure));
    }
    for success in &result.successes {
        by_class
            .entry(success.name.as_str())
            .or_default()
            .push(TestElement::from_success(success));
    }

    by_class
        .into_values()
        .flat_map(|mut methods| {
            methods.sort_by(TestElement::cmp_by_method);
            methods
        })
        .collect()
}
