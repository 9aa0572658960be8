//! CLI and project configuration

use crate::error::{CliError, CliResult};
use apexcov::{CoverageThreshold, ReportLayout, RunTest};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Check if debug mode
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Default log filter for this level
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

impl From<crate::commands::ColorArg> for ColorChoice {
    fn from(arg: crate::commands::ColorArg) -> Self {
        match arg {
            crate::commands::ColorArg::Auto => Self::Auto,
            crate::commands::ColorArg::Always => Self::Always,
            crate::commands::ColorArg::Never => Self::Never,
        }
    }
}

/// Project configuration (`apexcov.yaml`)
///
/// ```yaml
/// src_dir: src
/// output_dir: coverage-report
/// threshold: 75
/// api_version: "60.0"
/// fail_on_low_coverage: true
/// tests:
///   - class_name: FooTest
///   - class_name: SlowTest
///     run: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Directory holding `classes/` and `triggers/`
    pub src_dir: PathBuf,
    /// Report output directory
    pub output_dir: PathBuf,
    /// Coverage threshold percent
    pub threshold: CoverageThreshold,
    /// Tooling API version
    pub api_version: Option<String>,
    /// Test classes to run
    pub tests: Vec<RunTest>,
    /// Fail the step when a class is below the threshold
    pub fail_on_low_coverage: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("src"),
            output_dir: ReportLayout::default().output_dir,
            threshold: CoverageThreshold::default(),
            api_version: None,
            tests: Vec::new(),
            fail_on_low_coverage: true,
        }
    }
}

impl ProjectConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> CliResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration file, or defaults if it does not exist
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no project config, using defaults");
            return Ok(Self::default());
        }
        let yaml = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded project config");
        Self::from_yaml(&yaml)
    }

    /// Check the test list
    pub fn validate(&self) -> CliResult<()> {
        if let Some(test) = self.tests.iter().find(|t| t.class_name.trim().is_empty()) {
            return Err(CliError::config(format!(
                "test entry with empty class name (run: {})",
                test.run
            )));
        }
        Ok(())
    }

    /// Report layout for this project
    #[must_use]
    pub fn layout(&self) -> ReportLayout {
        ReportLayout::new(&self.output_dir)
    }
}
