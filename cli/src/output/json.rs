//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, and the deployment report formatter.

use anyhow::{Context, Result};

use crate::domain::report::DeployReport;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format a finished deployment.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_report(report: &DeployReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("JSON serialization failed")
}

/// Map an error chain to a stable machine-readable code.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    use crate::domain::error::{DeployError, PlanError, TaskFileError};

    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<PlanError>() {
            return match e {
                PlanError::MissingCluster
                | PlanError::MissingTaskFamily
                | PlanError::MissingTaskFile => "MISSING_OPTION",
                _ => "INVALID_OPTION",
            };
        }
        if let Some(e) = cause.downcast_ref::<TaskFileError>() {
            return match e {
                TaskFileError::NotFound(_) => "TASK_FILE_NOT_FOUND",
                _ => "INVALID_TASK_FILE",
            };
        }
        if let Some(e) = cause.downcast_ref::<DeployError>() {
            return match e {
                DeployError::ClusterNotFound(_) => "CLUSTER_NOT_FOUND",
                DeployError::ServiceNotFound(_) => "SERVICE_NOT_FOUND",
                DeployError::TaskFailed { .. } => "TASK_FAILED",
                DeployError::TaskStopped { .. } => "TASK_STOPPED",
                DeployError::WaitTimedOut { .. } => "WAIT_TIMEOUT",
                DeployError::EmptyResponse { .. } => "API_ERROR",
            };
        }
    }
    "DEPLOY_FAILED"
}
