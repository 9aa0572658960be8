//! Per-class coverage elements and the high/low threshold.
//!
//! A [`CoverageElement`] is computed once from a raw coverage record and never
//! changes afterwards. The percentage is stored alongside the counts so that an
//! XML snapshot carries exactly what was rendered.

use crate::result::{ReportError, ReportResult};
use crate::run::CodeCoverageRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default minimum coverage percent treated as acceptable
pub const DEFAULT_COVERAGE_THRESHOLD: u8 = 75;

/// Minimum acceptable coverage percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CoverageThreshold(u8);

impl CoverageThreshold {
    /// Threshold used when none is configured
    pub const DEFAULT: Self = Self(DEFAULT_COVERAGE_THRESHOLD);

    /// Create a threshold, rejecting values above 100
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `percent > 100`
    pub fn new(percent: u8) -> ReportResult<Self> {
        if percent > 100 {
            return Err(ReportError::config(format!(
                "coverage threshold {percent} is above 100"
            )));
        }
        Ok(Self(percent))
    }

    /// Threshold as a percentage
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Classify a coverage percentage against this threshold
    #[must_use]
    pub fn level(self, coverage_percent: f64) -> CoverageLevel {
        if coverage_percent >= f64::from(self.0) {
            CoverageLevel::High
        } else {
            CoverageLevel::Low
        }
    }
}

impl Default for CoverageThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for CoverageThreshold {
    type Error = ReportError;

    fn try_from(value: u8) -> ReportResult<Self> {
        Self::new(value)
    }
}

impl From<CoverageThreshold> for u8 {
    fn from(value: CoverageThreshold) -> Self {
        value.0
    }
}

impl fmt::Display for CoverageThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Visual classification of a coverage percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageLevel {
    /// At or above the threshold
    High,
    /// Below the threshold
    Low,
}

impl CoverageLevel {
    /// CSS class used by the HTML report
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::High => "coverage-high",
            Self::Low => "coverage-low",
        }
    }

    /// Check if the level is below threshold
    #[must_use]
    pub const fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }
}

/// Coverage of one class or trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageElement {
    #[serde(rename = "@className")]
    class_name: String,
    total_lines: u32,
    coverage_lines: u32,
    coverage_percent: f64,
}

impl CoverageElement {
    /// Compute coverage from location counts
    ///
    /// A class without locations counts as fully covered.
    #[must_use]
    pub fn new(class_name: impl Into<String>, total_locations: u32, uncovered: u32) -> Self {
        let coverage_lines = total_locations.saturating_sub(uncovered);
        let coverage_percent = if total_locations == 0 {
            100.0
        } else {
            100.0 * f64::from(coverage_lines) / f64::from(total_locations)
        };
        Self {
            class_name: class_name.into(),
            total_lines: total_locations,
            coverage_lines,
            coverage_percent,
        }
    }

    /// Build from a raw coverage record
    #[must_use]
    pub fn from_record(record: &CodeCoverageRecord) -> Self {
        Self::new(
            record.name.clone(),
            record.num_locations,
            record.num_locations_not_covered,
        )
    }

    /// Class or trigger name
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Number of executable locations
    #[must_use]
    pub const fn total_lines(&self) -> u32 {
        self.total_lines
    }

    /// Number of locations exercised by tests
    #[must_use]
    pub const fn coverage_lines(&self) -> u32 {
        self.coverage_lines
    }

    /// Covered share of locations, 0-100
    #[must_use]
    pub const fn coverage_percent(&self) -> f64 {
        self.coverage_percent
    }

    /// High/low classification against a threshold
    #[must_use]
    pub fn level(&self, threshold: CoverageThreshold) -> CoverageLevel {
        threshold.level(self.coverage_percent)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod threshold_tests {
        use super::*;

        #[test]
        fn test_default_threshold() {
            assert_eq!(CoverageThreshold::default().percent(), 75);
        }

        #[test]
        fn test_threshold_bounds() {
            assert!(CoverageThreshold::new(0).is_ok());
            assert!(CoverageThreshold::new(100).is_ok());
            assert!(CoverageThreshold::new(101).is_err());
        }

        #[test]
        fn test_level_boundary_is_high() {
            let threshold = CoverageThreshold::new(75).unwrap();
            assert_eq!(threshold.level(75.0), CoverageLevel::High);
            assert_eq!(threshold.level(74.9), CoverageLevel::Low);
        }

        #[test]
        fn test_level_css_class() {
            assert_eq!(CoverageLevel::High.css_class(), "coverage-high");
            assert_eq!(CoverageLevel::Low.css_class(), "coverage-low");
        }

        #[test]
        fn test_display() {
            assert_eq!(CoverageThreshold::default().to_string(), "75%");
        }

        #[test]
        fn test_deserialize_rejects_out_of_range() {
            assert!(serde_json::from_str::<CoverageThreshold>("90").is_ok());
            assert!(serde_json::from_str::<CoverageThreshold>("150").is_err());
        }
    }

    mod element_tests {
        use super::*;

        #[test]
        fn test_partial_coverage() {
            let element = CoverageElement::new("Foo", 10, 2);
            assert_eq!(element.class_name(), "Foo");
            assert_eq!(element.total_lines(), 10);
            assert_eq!(element.coverage_lines(), 8);
            assert!((element.coverage_percent() - 80.0).abs() < f64::EPSILON);
        }

        #[test]
        fn test_zero_locations_is_fully_covered() {
            let element = CoverageElement::new("Bar", 0, 0);
            assert_eq!(element.coverage_lines(), 0);
            assert_eq!(element.coverage_percent(), 100.0);
        }

        #[test]
        fn test_nothing_covered() {
            let element = CoverageElement::new("Baz", 5, 5);
            assert_eq!(element.coverage_lines(), 0);
            assert_eq!(element.coverage_percent(), 0.0);
        }

        #[test]
        fn test_from_record() {
            let record = CodeCoverageRecord::new("Trigger1", 4, 1);
            let element = CoverageElement::from_record(&record);
            assert_eq!(element.class_name(), "Trigger1");
            assert_eq!(element.coverage_lines(), 3);
            assert!((element.coverage_percent() - 75.0).abs() < f64::EPSILON);
        }

        #[test]
        fn test_level_uses_threshold() {
            let element = CoverageElement::new("Foo", 10, 3);
            assert!(element.level(CoverageThreshold::default()).is_low());
            assert!(!element
                .level(CoverageThreshold::new(70).unwrap())
                .is_low());
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_percent_matches_definition(total in 0u32..100_000, ratio in 0.0f64..=1.0) {
                let uncovered = (f64::from(total) * ratio) as u32;
                let element = CoverageElement::new("C", total, uncovered);

                prop_assert_eq!(element.coverage_lines(), total - uncovered);
                if total == 0 {
                    prop_assert_eq!(element.coverage_percent(), 100.0);
                } else {
                    let expected = 100.0 * f64::from(total - uncovered) / f64::from(total);
                    prop_assert_eq!(element.coverage_percent(), expected);
                }
                prop_assert!((0.0..=100.0).contains(&element.coverage_percent()));
            }
        }
    }
}
