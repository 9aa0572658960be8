//! HTML coverage report formatter
//!
//! Produces a document with three tables:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Total (fail: 1, success: 3) │ 8/10 │ 80.0    │  total-table
//! ├──────────────────────────────────────────────┤
//! │ Class name │ Coverage lines │ Coverage pct   │  one row per class
//! ├──────────────────────────────────────────────┤
//! │ FooTest (duration: 2.000)                    │  tests-table: group header
//! │ testA │ boom │ ☒ │ ☐ │ 1.200                 │  then method rows
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Styling lives in an external stylesheet referenced by name.

use crate::coverage::{CoverageElement, CoverageThreshold};
use crate::report::{ClassGroup, CoverageReport};
use crate::test_element::TestElement;
use std::fmt::Write;

/// Default stylesheet file name
pub const DEFAULT_STYLESHEET: &str = "coverage-report.css";

/// Stylesheet shipped with the library
pub const STYLESHEET: &str = include_str!("../assets/coverage-report.css");

const SIGN_CHECKED: &str = "&#9745;";
const SIGN_CROSSED: &str = "&#9746;";
const SIGN_EMPTY: &str = "&#9744;";

/// HTML report generator
#[derive(Debug)]
pub struct HtmlFormatter<'a> {
    report: &'a CoverageReport,
    threshold: CoverageThreshold,
    stylesheet: String,
}

impl<'a> HtmlFormatter<'a> {
    /// Create a formatter with the default threshold and stylesheet
    #[must_use]
    pub fn new(report: &'a CoverageReport) -> Self {
        Self {
            report,
            threshold: CoverageThreshold::default(),
            stylesheet: DEFAULT_STYLESHEET.to_string(),
        }
    }

    /// Set the high/low coverage threshold
    #[must_use]
    pub const fn with_threshold(mut self, threshold: CoverageThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the stylesheet href
    #[must_use]
    pub fn with_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.stylesheet = stylesheet.into();
        self
    }

    /// Generate the complete HTML document
    #[must_use]
    pub fn generate(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n<title>Apex Coverage Report</title>\n");
        let _ = writeln!(
            html,
            r#"<link rel="stylesheet" type="text/css" href="{}">"#,
            escape_html(&self.stylesheet)
        );
        html.push_str("</head>\n<body>\n");

        self.write_total_table(&mut html);
        self.write_classes_table(&mut html);
        self.write_tests_table(&mut html);

        if !self.report.generated().is_empty() {
            let _ = writeln!(
                html,
                r#"<p class="generated">Generated: {}</p>"#,
                escape_html(self.report.generated())
            );
        }
        html.push_str("</body>\n</html>\n");
        html
    }

    fn write_total_table(&self, html: &mut String) {
        let report = self.report;
        html.push_str("<table class=\"total-table\">\n<tbody>\n<tr>");
        let _ = write!(
            html,
            "<td><b>Total</b> (fail: {}, success: {})</td>",
            report.fail_count(),
            report.success_count()
        );
        let _ = write!(
            html,
            r#"<td class="total-col">{}/{}</td>"#,
            report.total_coverage_lines(),
            report.total_lines()
        );
        let _ = write!(
            html,
            r#"<td class="total-col">{}</td>"#,
            format_percent(report.total_percent())
        );
        html.push_str("</tr>\n</tbody>\n</table>\n");
    }

    fn write_classes_table(&self, html: &mut String) {
        html.push_str("<table class=\"classes-table\">\n<thead>\n<tr>");
        html.push_str("<th>Class name</th><th>Coverage lines</th><th>Coverage percent</th>");
        html.push_str("</tr>\n</thead>\n<tbody>\n");
        for element in self.report.classes() {
            html.push_str(&coverage_row(element, self.threshold));
            html.push('\n');
        }
        html.push_str("</tbody>\n</table>\n");
    }

    fn write_tests_table(&self, html: &mut String) {
        html.push_str("<table class=\"tests-table\">\n<thead>\n<tr>");
        html.push_str(
            "<th>Method name</th><th>Error</th><th>State</th><th>See all data</th><th>Duration</th>",
        );
        html.push_str("</tr>\n</thead>\n<tbody>\n");
        for group in self.report.test_groups() {
            html.push_str(&group_row(&group));
            html.push('\n');
            for method in group.methods() {
                html.push_str(&method_row(method));
                html.push('\n');
            }
        }
        html.push_str("</tbody>\n</table>\n");
    }
}

/// Render one class coverage row
#[must_use]
pub fn coverage_row(element: &CoverageElement, threshold: CoverageThreshold) -> String {
    let level = element.level(threshold).css_class();
    format!(
        r#"<tr><td>{}</td><td class="lines-col {level}">{} / {}</td><td class="percent-col {level}">{:.1}</td></tr>"#,
        escape_html(element.class_name()),
        element.coverage_lines(),
        element.total_lines(),
        element.coverage_percent(),
    )
}

/// Render one test method row
#[must_use]
pub fn method_row(method: &TestElement) -> String {
    let mut row = String::from("<tr>");
    let _ = write!(
        row,
        r#"<td class="col-method-name">{}</td>"#,
        escape_html(method.method_name())
    );

    row.push_str(r#"<td class="error">"#);
    row.push_str(&escape_html(method.fail_message().unwrap_or_default()));
    if let Some(trace) = method.stack_trace().filter(|t| !t.is_empty()) {
        let _ = write!(row, r#"<pre class="stack-trace">{}</pre>"#, escape_html(trace));
    }
    row.push_str("</td>");

    let (state_class, state_sign) = if method.is_fail() {
        ("error", SIGN_CROSSED)
    } else {
        ("success", SIGN_CHECKED)
    };
    let _ = write!(row, r#"<td class="col-state {state_class}">{state_sign}</td>"#);

    let (flag_class, flag_sign) = if method.see_all_data() {
        ("flag-on", SIGN_CHECKED)
    } else {
        ("flag-off", SIGN_EMPTY)
    };
    let _ = write!(row, r#"<td class="col-flag {flag_class}">{flag_sign}</td>"#);

    let _ = write!(
        row,
        r#"<td class="col-duration">{}</td>"#,
        format_duration(method.duration())
    );
    row.push_str("</tr>");
    row
}

fn group_row(group: &ClassGroup<'_>) -> String {
    format!(
        r#"<tr><td colspan="5" class="col-class-name"><b class="{}">{}</b> (duration: {})</td></tr>"#,
        if group.is_failing() { "error" } else { "success" },
        escape_html(group.class_name()),
        format_duration(group.duration()),
    )
}

/// Format an optional percentage with one decimal
#[must_use]
pub fn format_percent(percent: Option<f64>) -> String {
    percent.map_or_else(|| "n/a".to_string(), |p| format!("{p:.1}"))
}

fn format_duration(seconds: f64) -> String {
    format!("{seconds:.3}")
}

/// Escape HTML special characters
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
