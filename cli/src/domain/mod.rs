//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod ecs;
pub mod error;
pub mod plan;
pub mod report;
pub mod scaling;
pub mod task_file;

pub use config::DeployConfig;
pub use ecs::{ApiFailure, ClusterInfo, ServiceInfo, ServiceUpdate, TaskInfo, TaskLaunch, TaskStatus};
pub use error::{DeployError, PlanError, TaskFileError};
pub use plan::{DeployMode, DeployRequest, DeploymentPlan};
pub use report::{DeployReport, RolloutOutcome};
pub use scaling::ScalePlan;
pub use task_file::{ContainerDefinition, TaskFileFormat};
