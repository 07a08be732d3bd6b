//! Summary of a finished deployment, rendered by `--json`.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of the rollout step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RolloutOutcome {
    /// A one-off task reached `RUNNING`.
    Task { task_arn: String, polls: u32 },
    /// The service was moved to the new task definition.
    Service {
        service: String,
        /// Running count before the rollout started.
        previous_running: i32,
        /// `None` when the downscale step was skipped.
        downscaled_to: Option<i32>,
        desired_count: i32,
        running_count: i32,
    },
}

/// Everything a caller may want to know about a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    pub cluster: String,
    pub family: String,
    pub task_definition_arn: String,
    pub containers: usize,
    pub outcome: RolloutOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
