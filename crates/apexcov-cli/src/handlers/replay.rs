//! Replay command handler

use crate::commands::ReplayArgs;
use crate::config::{CliConfig, ProjectConfig};
use crate::error::CliResult;
use crate::handlers::{execute_pipeline, resolve_pipeline};
use apexcov::JsonFileService;

/// Execute the replay command
pub fn execute_replay(
    config: &CliConfig,
    project: &ProjectConfig,
    args: &ReplayArgs,
) -> CliResult<()> {
    let settings = resolve_pipeline(project, &args.pipeline)?;
    let service = JsonFileService::new(&args.raw);
    let message = format!("Replaying {}", args.raw.display());
    execute_pipeline(config, project, settings, &service, &message)?;
    Ok(())
}
