//! Deployment plan — validated input to the deploy workflow.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::domain::error::PlanError;

/// Default number of tasks the service should run after the deployment.
pub const DEFAULT_RUNNING_AMOUNT: i32 = 1;

/// Default delay between two task status polls.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// ECS task definition family naming rule.
pub static FAMILY_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Constant pattern.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-zA-Z0-9_-]{1,255}$").expect("valid regex")
});

/// Raw deploy options after flags, environment and config file are merged.
#[derive(Debug, Clone, Default)]
pub struct DeployRequest {
    pub cluster: Option<String>,
    pub service: Option<String>,
    pub family: Option<String>,
    pub task_file: Option<String>,
    pub running_amount: Option<i32>,
    pub poll_interval_secs: Option<u64>,
    pub wait_timeout_secs: Option<u64>,
}

/// How the registered task definition is rolled out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployMode {
    /// Run a single task and wait for it to start.
    OneOff,
    /// Rolling update of a long-running service.
    Service { name: String },
}

/// Validated, immutable deployment input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentPlan {
    pub cluster: String,
    pub mode: DeployMode,
    pub family: String,
    pub task_file: PathBuf,
    pub running_amount: i32,
    pub poll_interval: Duration,
    pub wait_timeout: Option<Duration>,
}

impl DeploymentPlan {
    /// Validate a raw request.
    ///
    /// Options are checked in the order the workflow needs them: cluster,
    /// task family, task file. Blank strings count as missing.
    ///
    /// # Errors
    ///
    /// Returns the first `PlanError` found.
    pub fn from_request(request: &DeployRequest, cwd: &Path) -> Result<Self, PlanError> {
        let cluster = non_blank(request.cluster.as_deref()).ok_or(PlanError::MissingCluster)?;
        let family = non_blank(request.family.as_deref()).ok_or(PlanError::MissingTaskFamily)?;
        if !FAMILY_RE.is_match(family) {
            return Err(PlanError::InvalidFamily(family.to_owned()));
        }
        let task_file =
            non_blank(request.task_file.as_deref()).ok_or(PlanError::MissingTaskFile)?;

        let running_amount = request.running_amount.unwrap_or(DEFAULT_RUNNING_AMOUNT);
        if running_amount < 1 {
            return Err(PlanError::InvalidRunningAmount(running_amount));
        }

        let poll_secs = request
            .poll_interval_secs
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
        if poll_secs == 0 {
            return Err(PlanError::InvalidPollInterval);
        }

        let mode = match non_blank(request.service.as_deref()) {
            Some(name) => DeployMode::Service {
                name: name.to_owned(),
            },
            None => DeployMode::OneOff,
        };

        Ok(Self {
            cluster: cluster.to_owned(),
            mode,
            family: family.to_owned(),
            task_file: resolve_task_file(task_file, cwd),
            running_amount,
            poll_interval: Duration::from_secs(poll_secs),
            wait_timeout: request.wait_timeout_secs.map(Duration::from_secs),
        })
    }

    /// Name of the target service, when deploying in service mode.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        match &self.mode {
            DeployMode::Service { name } => Some(name),
            DeployMode::OneOff => None,
        }
    }
}

/// Resolve the task file location.
///
/// A leading `./` is anchored to `cwd`; anything else is used as given.
#[must_use]
pub fn resolve_task_file(raw: &str, cwd: &Path) -> PathBuf {
    match raw.strip_prefix("./") {
        Some(rest) => cwd.join(rest),
        None => PathBuf::from(raw),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
