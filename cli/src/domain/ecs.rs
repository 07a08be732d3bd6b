//! Provider-neutral views of the orchestration API responses.
//!
//! Infrastructure maps SDK output into these types so the workflow and its
//! tests never see SDK structs.

/// A cluster as returned by describe-clusters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterInfo {
    pub name: String,
    pub arn: Option<String>,
    pub status: Option<String>,
}

impl ClusterInfo {
    /// Deleted clusters are still described, with status `INACTIVE`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.as_deref() != Some("INACTIVE")
    }
}

/// A service as returned by describe-services or update-service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub status: Option<String>,
    pub running_count: i32,
    pub desired_count: i32,
    pub task_definition: Option<String>,
}

impl ServiceInfo {
    /// Deleted services linger as `INACTIVE` for a while.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.as_deref() != Some("INACTIVE")
    }
}

/// Parameters of one update-service call.
///
/// `None` fields are left untouched by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUpdate {
    pub cluster: String,
    pub service: String,
    pub desired_count: Option<i32>,
    pub task_definition: Option<String>,
}

/// Per-resource failure reported in a run-task or describe-tasks response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub arn: Option<String>,
    pub reason: Option<String>,
    pub detail: Option<String>,
}

impl ApiFailure {
    /// ARN to name in error messages.
    #[must_use]
    pub fn arn_or_unknown(&self) -> &str {
        self.arn.as_deref().unwrap_or("unknown")
    }

    /// Reason to show in error messages, including the detail when present.
    #[must_use]
    pub fn describe(&self) -> String {
        let reason = self.reason.as_deref().unwrap_or("unknown reason");
        match self.detail.as_deref() {
            Some(detail) if !detail.is_empty() => format!("{reason} ({detail})"),
            _ => reason.to_owned(),
        }
    }
}

/// A task as returned by run-task or describe-tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInfo {
    pub arn: String,
    pub last_status: TaskStatus,
    pub stopped_reason: Option<String>,
}

/// Tasks and failures of one run-task or describe-tasks call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskLaunch {
    pub tasks: Vec<TaskInfo>,
    pub failures: Vec<ApiFailure>,
}

/// ECS task lifecycle status (`lastStatus`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Provisioning,
    Pending,
    Activating,
    Running,
    Deactivating,
    Stopping,
    Deprovisioning,
    Stopped,
    Other(String),
}

impl TaskStatus {
    /// Map the API string; unknown values are kept verbatim.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "PROVISIONING" => Self::Provisioning,
            "PENDING" => Self::Pending,
            "ACTIVATING" => Self::Activating,
            "RUNNING" => Self::Running,
            "DEACTIVATING" => Self::Deactivating,
            "STOPPING" => Self::Stopping,
            "DEPROVISIONING" => Self::Deprovisioning,
            "STOPPED" => Self::Stopped,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Provisioning => "PROVISIONING",
            Self::Pending => "PENDING",
            Self::Activating => "ACTIVATING",
            Self::Running => "RUNNING",
            Self::Deactivating => "DEACTIVATING",
            Self::Stopping => "STOPPING",
            Self::Deprovisioning => "DEPROVISIONING",
            Self::Stopped => "STOPPED",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
