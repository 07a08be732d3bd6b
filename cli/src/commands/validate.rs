//! `ecs-deploy validate` — check a task file offline.

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::services::task_file::load_task_file;
use crate::domain::plan::resolve_task_file;
use crate::infra::fs::LocalFs;

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON or YAML file with the container definitions
    #[arg(value_name = "TASK_FILE")]
    pub task_file: String,
}

/// Run `ecs-deploy validate`.
///
/// # Errors
///
/// Returns an error if the file is missing or not a valid task file.
pub fn run(args: &ValidateArgs, app: &AppContext) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let path = resolve_task_file(&args.task_file, &cwd);
    let containers = load_task_file(&LocalFs, &path)?;

    if app.is_json() {
        let out = serde_json::json!({
            "path": path.display().to_string(),
            "valid": true,
            "containers": containers,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("JSON serialization failed")?
        );
    } else {
        app.human().render_task_file(&path, &containers);
    }
    Ok(())
}
