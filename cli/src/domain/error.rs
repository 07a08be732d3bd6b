//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Plan errors ───────────────────────────────────────────────────────────────

/// Errors raised while turning raw options into a `DeploymentPlan`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("Cluster option value is required")]
    MissingCluster,

    #[error("Task name option is required")]
    MissingTaskFamily,

    #[error("Task file option is required")]
    MissingTaskFile,

    #[error(
        "Invalid task family '{0}': up to 255 letters, numbers, hyphens and underscores allowed"
    )]
    InvalidFamily(String),

    #[error("Invalid running amount {0}: at least one task must be requested")]
    InvalidRunningAmount(i32),

    #[error("Invalid poll interval: must be at least one second")]
    InvalidPollInterval,
}

// ── Task file errors ──────────────────────────────────────────────────────────

/// Errors related to loading and validating the container definitions file.
#[derive(Debug, Error)]
pub enum TaskFileError {
    #[error("File not found in path: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot parse task file as {format}: {message}")]
    Parse { format: &'static str, message: String },

    #[error("Task file defines no containers")]
    Empty,

    #[error("Container #{index} has no {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("Container name '{0}' is defined more than once")]
    DuplicateName(String),

    #[error("At least one container must be marked essential")]
    NoEssentialContainer,
}

// ── Deploy errors ─────────────────────────────────────────────────────────────

/// Errors reported while the deployment workflow talks to the cluster.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Cluster named '{0}' not found")]
    ClusterNotFound(String),

    #[error("Service '{0}' not found")]
    ServiceNotFound(String),

    #[error("Task '{arn}' failed: {reason}")]
    TaskFailed { arn: String, reason: String },

    #[error("Task '{arn}' stopped before reaching RUNNING: {reason}")]
    TaskStopped { arn: String, reason: String },

    #[error("Task '{arn}' did not reach RUNNING within {seconds}s (last status '{status}')")]
    WaitTimedOut {
        arn: String,
        status: String,
        seconds: u64,
    },

    #[error("{operation} returned no {what}")]
    EmptyResponse {
        operation: &'static str,
        what: &'static str,
    },
}
