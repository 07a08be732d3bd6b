//! Domain types for the ecs-deploy configuration file.
//!
//! Pure data only. Reading the file is `infra::config`.

use serde::{Deserialize, Serialize};

use crate::domain::plan::DeployRequest;

/// Defaults stored in `~/.ecs-deploy/config.yaml`.
///
/// Every key is optional; command-line flags and environment variables
/// take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    /// AWS region used when `--region` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Cluster used when `--cluster` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    /// Custom ECS endpoint, e.g. a LocalStack URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running_amount: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_timeout_secs: Option<u64>,
}

impl DeployConfig {
    /// Fill the gaps of `request` with configured defaults.
    #[must_use]
    pub fn apply_defaults(&self, mut request: DeployRequest) -> DeployRequest {
        request.cluster = request.cluster.or_else(|| self.cluster.clone());
        request.running_amount = request.running_amount.or(self.running_amount);
        request.poll_interval_secs = request.poll_interval_secs.or(self.poll_interval_secs);
        request.wait_timeout_secs = request.wait_timeout_secs.or(self.wait_timeout_secs);
        request
    }
}
