//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// The report was written but the build step fails
    #[error("{summary}")]
    Verdict {
        /// Enumerated failures
        summary: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Project configuration file could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Report library error
    #[error(transparent)]
    Report(#[from] apexcov::ReportError),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a failing-verdict error
    #[must_use]
    pub fn verdict(summary: impl Into<String>) -> Self {
        Self::Verdict {
            summary: summary.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad config");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("threshold 120");
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_verdict_error_is_summary() {
        let err = CliError::verdict("1 test(s) failed:");
        assert_eq!(err.to_string(), "1 test(s) failed:");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }

    #[test]
    fn test_report_error_is_transparent() {
        let err: CliError = apexcov::ReportError::remote("session expired").into();
        assert_eq!(
            err.to_string(),
            apexcov::ReportError::remote("session expired").to_string()
        );
    }
}
