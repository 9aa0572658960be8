//! Run command handler

use apexcov::{ReportError, ReportResult, RunTestsResult, TestRunService};
use std::path::Path;
use tracing::info;

/// Saves every raw result it passes through, for later `replay`
pub struct SavingService<'a> {
    inner: &'a dyn TestRunService,
    path: &'a Path,
}

impl std::fmt::Debug for SavingService<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavingService")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<'a> SavingService<'a> {
    /// Wrap a service, saving results to `path`
    #[must_use]
    pub fn new(inner: &'a dyn TestRunService, path: &'a Path) -> Self {
        Self { inner, path }
    }
}

impl TestRunService for SavingService<'_> {
    fn run_tests(&self, class_names: &[String]) -> ReportResult<RunTestsResult> {
        let result = self.inner.run_tests(class_names)?;
        let json = result.to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::file(parent, e))?;
        }
        std::fs::write(self.path, json).map_err(|e| ReportError::file(self.path, e))?;
        info!(path = %self.path.display(), "saved raw run result");
        Ok(result)
    }
}

#[cfg(feature = "remote")]
pub use remote::execute_run;

#[cfg(feature = "remote")]
mod remote {
    use super::SavingService;
    use crate::commands::RunArgs;
    use crate::config::{CliConfig, ProjectConfig};
    use crate::error::CliResult;
    use crate::handlers::{execute_pipeline, resolve_pipeline};
    use apexcov::{TestRunService, ToolingApiService};

    /// Execute the run command
    pub fn execute_run(config: &CliConfig, project: &ProjectConfig, args: &RunArgs) -> CliResult<()> {
        let settings = resolve_pipeline(project, &args.pipeline)?;

        let mut service = ToolingApiService::new(&args.instance_url, &args.access_token)?;
        if let Some(version) = args.api_version.as_ref().or(project.api_version.as_ref()) {
            service = service.with_api_version(version);
        }

        let saving;
        let service: &dyn TestRunService = match &args.save_raw {
            Some(path) => {
                saving = SavingService::new(&service, path);
                &saving
            }
            None => &service,
        };

        let message = format!("Running tests on {}", args.instance_url);
        execute_pipeline(config, project, settings, service, &message)?;
        Ok(())
    }
}
