//! Tooling REST API client
//!
//! Runs test classes through `runTestsSynchronous`. The call blocks until the
//! platform has finished the whole run; there are no retries.

use crate::result::{ReportError, ReportResult};
use crate::run::{RunTestsResult, TestRunService};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Default Tooling API version
pub const DEFAULT_API_VERSION: &str = "60.0";

/// Request body for `runTestsSynchronous`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunTestsRequest {
    /// Test classes to run
    pub tests: Vec<TestItem>,
}

/// One test class in a run request
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestItem {
    /// Test class name
    pub class_name: String,
}

impl RunTestsRequest {
    /// Build a request for the given classes
    #[must_use]
    pub fn new(class_names: &[String]) -> Self {
        Self {
            tests: class_names
                .iter()
                .map(|name| TestItem {
                    class_name: name.clone(),
                })
                .collect(),
        }
    }
}

/// `TestRunService` backed by an org's Tooling API
#[derive(Debug, Clone)]
pub struct ToolingApiService {
    instance_url: String,
    access_token: String,
    api_version: String,
    client: reqwest::blocking::Client,
}

impl ToolingApiService {
    /// Create a client for an org instance
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the instance URL or token is empty,
    /// or a remote error if the HTTP client cannot be built
    pub fn new(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> ReportResult<Self> {
        let instance_url = instance_url.into().trim_end_matches('/').to_string();
        let access_token = access_token.into();
        if instance_url.is_empty() {
            return Err(ReportError::config("instance URL is empty"));
        }
        if access_token.is_empty() {
            return Err(ReportError::config("access token is empty"));
        }

        // Synchronous test runs can take minutes on large orgs
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ReportError::remote(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            instance_url,
            access_token,
            api_version: DEFAULT_API_VERSION.to_string(),
            client,
        })
    }

    /// Use a specific API version (e.g. "59.0")
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Instance URL without trailing slash
    #[must_use]
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// API version in use
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Endpoint the run request is posted to
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/services/data/v{}/tooling/runTestsSynchronous/",
            self.instance_url, self.api_version
        )
    }
}

impl TestRunService for ToolingApiService {
    fn run_tests(&self, class_names: &[String]) -> ReportResult<RunTestsResult> {
        let url = self.endpoint();
        info!(url = %url, classes = class_names.len(), "running tests synchronously");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&RunTestsRequest::new(class_names))
            .send()
            .map_err(|e| ReportError::remote(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ReportError::remote(format!("failed to read response: {e}")))?;
        if !status.is_success() {
            return Err(ReportError::remote(format!("API error {status}: {body}")));
        }

        debug!(bytes = body.len(), "received run result");
        RunTestsResult::from_json(&body)
            .map_err(|e| ReportError::remote(format!("unexpected response body: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let service = ToolingApiService::new("https://example.my.salesforce.com/", "token")
            .unwrap()
            .with_api_version("59.0");
        assert_eq!(service.instance_url(), "https://example.my.salesforce.com");
        assert_eq!(
            service.endpoint(),
            "https://example.my.salesforce.com/services/data/v59.0/tooling/runTestsSynchronous/"
        );
    }

    #[test]
    fn test_default_api_version() {
        let service = ToolingApiService::new("https://x.example", "token").unwrap();
        assert_eq!(service.api_version(), DEFAULT_API_VERSION);
    }

    #[test]
    fn test_request_body() {
        let request = RunTestsRequest::new(&["FooTest".to_string(), "BarTest".to_string()]);
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"tests":[{"className":"FooTest"},{"className":"BarTest"}]}"#
        );
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            ToolingApiService::new("", "token").unwrap_err(),
            ReportError::Config { .. }
        ));
        assert!(matches!(
            ToolingApiService::new("https://x.example", "").unwrap_err(),
            ReportError::Config { .. }
        ));
    }

    #[test]
    fn test_unreachable_instance_is_remote_error() {
        let service = ToolingApiService::new("http://127.0.0.1:1", "token").unwrap();
        let err = service.run_tests(&["FooTest".to_string()]).unwrap_err();
        assert!(matches!(err, ReportError::Remote { .. }));
    }
}
