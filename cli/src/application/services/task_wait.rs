//! Application service — wait for a one-off task to start.
//!
//! Polls describe-tasks at a fixed interval, without backoff, until the
//! task reports `RUNNING`. The wait is unbounded unless a timeout is given.
//! The timeout bounds the summed poll sleeps; time spent in describe-tasks
//! calls is not counted.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{Clock, ProgressReporter, TaskRunner};
use crate::domain::ecs::{TaskLaunch, TaskStatus};
use crate::domain::error::DeployError;

/// Parameters of a startup wait.
pub struct WaitOptions<'a> {
    pub cluster: &'a str,
    pub task_arn: &'a str,
    pub poll_interval: Duration,
    pub timeout: Option<Duration>,
}

/// Poll the task until it is running.
///
/// Returns the number of describe-tasks calls made.
///
/// # Errors
///
/// Returns an error if the API reports a failure, the task stops, the
/// timeout elapses, or a describe call fails.
pub async fn wait_until_running(
    runner: &impl TaskRunner,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    opts: &WaitOptions<'_>,
) -> Result<u32> {
    let mut polls = 0u32;
    let mut waited = Duration::ZERO;

    loop {
        let launch = runner
            .describe_task(opts.cluster, opts.task_arn)
            .await
            .with_context(|| format!("describing task '{}'", opts.task_arn))?;
        polls += 1;
        ensure_no_failures(&launch)?;

        let task = launch
            .tasks
            .into_iter()
            .next()
            .ok_or(DeployError::EmptyResponse {
                operation: "DescribeTasks",
                what: "task",
            })?;
        tracing::debug!(task = %task.arn, status = %task.last_status, polls, "task status");

        match task.last_status {
            TaskStatus::Running => {
                reporter.success("Task is running");
                return Ok(polls);
            }
            TaskStatus::Stopped => {
                return Err(DeployError::TaskStopped {
                    arn: task.arn,
                    reason: task
                        .stopped_reason
                        .unwrap_or_else(|| "no reason reported".to_owned()),
                }
                .into());
            }
            status => {
                if let Some(limit) = opts.timeout.filter(|limit| waited >= *limit) {
                    return Err(DeployError::WaitTimedOut {
                        arn: task.arn,
                        status: status.to_string(),
                        seconds: limit.as_secs(),
                    }
                    .into());
                }
                reporter.info(&format!("Task status is '{status}'. Waiting..."));
                clock.sleep(opts.poll_interval).await;
                waited = waited.saturating_add(opts.poll_interval);
            }
        }
    }
}

/// Turn the first reported API failure into a `TaskFailed` error.
///
/// # Errors
///
/// Returns `DeployError::TaskFailed` when `launch` carries any failure.
pub fn ensure_no_failures(launch: &TaskLaunch) -> Result<(), DeployError> {
    match launch.failures.first() {
        Some(failure) => Err(DeployError::TaskFailed {
            arn: failure.arn_or_unknown().to_owned(),
            reason: failure.describe(),
        }),
        None => Ok(()),
    }
}
