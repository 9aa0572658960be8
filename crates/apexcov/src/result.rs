//! Result and error types for apexcov.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for apexcov operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while running tests or producing reports
#[derive(Debug, Error)]
pub enum ReportError {
    /// The remote test run could not be completed
    #[error("Remote test run failed: {message}")]
    Remote {
        /// Error message
        message: String,
    },

    /// Invalid configuration (threshold, source directory, test list)
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Reading or writing a report artifact failed
    #[error("I/O error on {}: {source}", path.display())]
    File {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// XML snapshot could not be produced or parsed
    #[error("XML report error: {message}")]
    Xml {
        /// Error message
        message: String,
    },

    /// Source file glob was malformed
    #[error("Invalid source pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    /// Create a remote failure error
    #[must_use]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an XML error
    #[must_use]
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml {
            message: message.into(),
        }
    }

    /// Attach a path to an I/O error
    #[must_use]
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message() {
        let err = ReportError::remote("connection refused");
        assert_eq!(
            err.to_string(),
            "Remote test run failed: connection refused"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = ReportError::config("threshold 120 is above 100");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("120"));
    }

    #[test]
    fn test_file_error_includes_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ReportError::file("out/coverage-report.html", io);
        let text = err.to_string();
        assert!(text.contains("out/coverage-report.html"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ReportError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
