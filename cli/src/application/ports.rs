//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;

use crate::domain::{
    ClusterInfo, ContainerDefinition, DeployConfig, ServiceInfo, ServiceUpdate, TaskLaunch,
};

// ── Orchestrator Port Traits ──────────────────────────────────────────────────

/// Cluster lookups.
#[allow(async_fn_in_trait)]
pub trait ClusterInspector {
    /// Describe a cluster by name, returning `None` when it does not exist.
    async fn describe_cluster(&self, cluster: &str) -> Result<Option<ClusterInfo>>;
}

/// Service lookups and updates.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// Describe a service, returning `None` when it does not exist.
    async fn describe_service(&self, cluster: &str, service: &str) -> Result<Option<ServiceInfo>>;
    /// Change the desired count and/or task definition of a service.
    async fn update_service(&self, update: &ServiceUpdate) -> Result<ServiceInfo>;
}

/// Task definition registration.
#[allow(async_fn_in_trait)]
pub trait TaskDefinitionRegistry {
    /// Register a new revision of `family` and return its ARN.
    async fn register_task_definition(
        &self,
        family: &str,
        containers: &[ContainerDefinition],
    ) -> Result<String>;
}

/// One-off task execution.
#[allow(async_fn_in_trait)]
pub trait TaskRunner {
    /// Start one task from `task_definition` (family, family:revision or ARN).
    async fn run_task(&self, cluster: &str, task_definition: &str) -> Result<TaskLaunch>;
    /// Describe a single task.
    async fn describe_task(&self, cluster: &str, task_arn: &str) -> Result<TaskLaunch>;
}

/// Composite trait — any type implementing all four sub-traits is a
/// `ContainerOrchestrator`.
pub trait ContainerOrchestrator:
    ClusterInspector + ServiceManager + TaskDefinitionRegistry + TaskRunner
{
}

/// Blanket implementation: any type implementing all four sub-traits is a
/// `ContainerOrchestrator`.
impl<T> ContainerOrchestrator for T where
    T: ClusterInspector + ServiceManager + TaskDefinitionRegistry + TaskRunner
{
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Read access to the task file.
pub trait TaskFileSource {
    /// Returns `true` if a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;
    /// Read the whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading of the defaults file.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    fn load(&self) -> Result<DeployConfig>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Time Port ─────────────────────────────────────────────────────────────────

/// Suspends the workflow between task status polls.
#[allow(async_fn_in_trait)]
pub trait Clock {
    async fn sleep(&self, duration: Duration);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Announce a workflow step.
    fn step(&self, message: &str);
    /// Emit a success message closing the current step.
    fn success(&self, message: &str);
    /// Emit an intermediate status line, e.g. while waiting.
    fn info(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
