//! Console output and progress reporting

use apexcov::html::format_percent;
use apexcov::{CoverageReport, CoverageThreshold, WrittenFiles};
use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for a report run
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    spinner: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            spinner: None,
            use_color,
            quiet,
        }
    }

    /// Start a spinner while a blocking call runs
    pub fn start_spinner(&mut self, message: &str) {
        if self.quiet {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    /// Stop the spinner
    pub fn finish_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print the files a run wrote
    pub fn files(&self, files: &WrittenFiles) {
        for path in [&files.html, &files.xml, &files.stylesheet]
            .into_iter()
            .flatten()
        {
            self.info(&format!("Wrote {}", path.display()));
        }
    }

    /// Print the report totals
    pub fn summary(&self, report: &CoverageReport, threshold: CoverageThreshold) {
        if self.quiet && report.all_passed() {
            return;
        }

        let line = summary_line(report);
        let low = report
            .total_percent()
            .is_some_and(|p| threshold.level(p).is_low());
        let failed = !report.all_passed();

        let _ = self.term.write_line("");
        if self.use_color {
            let style = if failed || low {
                Style::new().red().bold()
            } else {
                Style::new().green().bold()
            };
            let _ = self.term.write_line(&style.apply_to(line).to_string());
        } else {
            let _ = self.term.write_line(&line);
        }
    }
}

/// One-line totals text
#[must_use]
pub fn summary_line(report: &CoverageReport) -> String {
    let percent = match report.total_percent() {
        Some(p) => format!("{}%", format_percent(Some(p))),
        None => format_percent(None),
    };
    format!(
        "{} passed, {} failed, coverage {}/{} lines ({percent})",
        report.success_count(),
        report.fail_count(),
        report.total_coverage_lines(),
        report.total_lines(),
    )
}
