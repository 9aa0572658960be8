//! Report file layout and writing
//!
//! Every artifact is rendered to a complete in-memory buffer before a single
//! write, so a failed render never leaves a half-written file behind.

use crate::coverage::CoverageThreshold;
use crate::html::{HtmlFormatter, DEFAULT_STYLESHEET, STYLESHEET};
use crate::report::CoverageReport;
use crate::result::{ReportError, ReportResult};
use crate::xml;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where report artifacts are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    /// Output directory
    pub output_dir: PathBuf,
    /// HTML report file name
    pub html_name: String,
    /// XML snapshot file name
    pub xml_name: String,
    /// Stylesheet file name, also used as the HTML link href
    pub stylesheet_name: String,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("coverage-report"),
            html_name: "coverage-report.html".to_string(),
            xml_name: "coverage-report.xml".to_string(),
            stylesheet_name: DEFAULT_STYLESHEET.to_string(),
        }
    }
}

impl ReportLayout {
    /// Create the default layout under `output_dir`
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// HTML report path
    #[must_use]
    pub fn html_path(&self) -> PathBuf {
        self.output_dir.join(&self.html_name)
    }

    /// XML snapshot path
    #[must_use]
    pub fn xml_path(&self) -> PathBuf {
        self.output_dir.join(&self.xml_name)
    }

    /// Stylesheet path
    #[must_use]
    pub fn stylesheet_path(&self) -> PathBuf {
        self.output_dir.join(&self.stylesheet_name)
    }
}

/// Paths of the artifacts a write produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenFiles {
    /// HTML report
    pub html: Option<PathBuf>,
    /// XML snapshot
    pub xml: Option<PathBuf>,
    /// Stylesheet
    pub stylesheet: Option<PathBuf>,
}

/// Writes reports according to a layout
#[derive(Debug, Clone)]
pub struct ReportWriter {
    layout: ReportLayout,
    threshold: CoverageThreshold,
}

impl ReportWriter {
    /// Create a writer for a layout
    #[must_use]
    pub const fn new(layout: ReportLayout) -> Self {
        Self {
            layout,
            threshold: CoverageThreshold::DEFAULT,
        }
    }

    /// Set the high/low threshold used for HTML styling
    #[must_use]
    pub const fn with_threshold(mut self, threshold: CoverageThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Layout in use
    #[must_use]
    pub const fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Write XML snapshot, HTML report, and stylesheet
    ///
    /// # Errors
    ///
    /// Returns error if rendering or any file write fails
    pub fn write_all(&self, report: &CoverageReport) -> ReportResult<WrittenFiles> {
        let xml = self.write_xml(report)?;
        let mut files = self.write_html(report)?;
        files.xml = Some(xml);
        Ok(files)
    }

    /// Write the HTML report and its stylesheet
    ///
    /// # Errors
    ///
    /// Returns error if a file write fails
    pub fn write_html(&self, report: &CoverageReport) -> ReportResult<WrittenFiles> {
        let html = HtmlFormatter::new(report)
            .with_threshold(self.threshold)
            .with_stylesheet(self.layout.stylesheet_name.clone())
            .generate();
        let html_path = self.layout.html_path();
        self.write_file(&html_path, &html)?;

        let css_path = self.layout.stylesheet_path();
        self.write_file(&css_path, STYLESHEET)?;

        info!(path = %html_path.display(), "HTML report saved");
        Ok(WrittenFiles {
            html: Some(html_path),
            xml: None,
            stylesheet: Some(css_path),
        })
    }

    /// Write the XML snapshot
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the file write fails
    pub fn write_xml(&self, report: &CoverageReport) -> ReportResult<PathBuf> {
        let content = xml::to_xml(report)?;
        let path = self.layout.xml_path();
        self.write_file(&path, &content)?;
        info!(path = %path.display(), "XML report saved");
        Ok(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> ReportResult<()> {
        std::fs::create_dir_all(&self.layout.output_dir)
            .map_err(|e| ReportError::file(&self.layout.output_dir, e))?;
        std::fs::write(path, content).map_err(|e| ReportError::file(path, e))
    }
}
