//! Application service — load the container definitions file.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::TaskFileSource;
use crate::domain::error::TaskFileError;
use crate::domain::task_file::{ContainerDefinition, TaskFileFormat, parse_container_definitions};

/// Read, parse and validate the task file at `path`.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or invalid.
pub fn load_task_file(
    files: &impl TaskFileSource,
    path: &Path,
) -> Result<Vec<ContainerDefinition>> {
    if !files.exists(path) {
        return Err(TaskFileError::NotFound(path.to_path_buf()).into());
    }
    let content = files
        .read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let containers = parse_container_definitions(&content, TaskFileFormat::from_path(path))
        .with_context(|| format!("invalid task file {}", path.display()))?;
    tracing::debug!(path = %path.display(), containers = containers.len(), "task file loaded");
    Ok(containers)
}
