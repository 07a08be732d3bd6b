//! Application service — the deployment workflow.
//!
//! Imports only from `crate::domain` and `crate::application`.
//! All I/O is routed through injected port traits.
//!
//! Sequence: check cluster, check service (service mode), register the task
//! definition, then either roll the service (downscale, swap, upscale) or run
//! a one-off task and wait for it to start.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::application::ports::{
    Clock, ContainerOrchestrator, ProgressReporter, ServiceManager, TaskFileSource,
};
use crate::application::services::task_file::load_task_file;
use crate::application::services::task_wait::{WaitOptions, ensure_no_failures, wait_until_running};
use crate::domain::ecs::{ClusterInfo, ServiceInfo, ServiceUpdate};
use crate::domain::error::DeployError;
use crate::domain::plan::DeploymentPlan;
use crate::domain::report::{DeployReport, RolloutOutcome};
use crate::domain::scaling::ScalePlan;

/// Run the whole deployment described by `plan`.
///
/// Accepts port trait bounds so the caller can inject real or mock
/// implementations. The service never touches any presentation type.
///
/// # Errors
///
/// Returns an error as soon as any step fails; later steps are not attempted.
pub async fn deploy(
    orchestrator: &impl ContainerOrchestrator,
    files: &impl TaskFileSource,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    plan: &DeploymentPlan,
) -> Result<DeployReport> {
    let started_at = Utc::now();
    tracing::info!(cluster = %plan.cluster, family = %plan.family, mode = ?plan.mode, "deployment started");

    check_cluster(orchestrator, reporter, &plan.cluster).await?;

    let checked_service = match plan.service() {
        Some(name) => {
            let info = check_service(orchestrator, reporter, &plan.cluster, name).await?;
            Some((name, info.running_count))
        }
        None => None,
    };

    reporter.step("Register new task");
    let containers = load_task_file(files, &plan.task_file)?;
    let task_definition_arn = orchestrator
        .register_task_definition(&plan.family, &containers)
        .await
        .with_context(|| format!("registering task definition '{}'", plan.family))?;
    tracing::info!(arn = %task_definition_arn, "task definition registered");
    reporter.success("Task definition register success");

    let outcome = match checked_service {
        Some((name, running)) => {
            roll_service(orchestrator, reporter, plan, name, running, &task_definition_arn).await?
        }
        None => run_one_off(orchestrator, clock, reporter, plan, &task_definition_arn).await?,
    };

    tracing::info!(arn = %task_definition_arn, "deployment finished");
    Ok(DeployReport {
        cluster: plan.cluster.clone(),
        family: plan.family.clone(),
        task_definition_arn,
        containers: containers.len(),
        outcome,
        started_at,
        finished_at: Utc::now(),
    })
}

async fn check_cluster(
    orchestrator: &impl ContainerOrchestrator,
    reporter: &impl ProgressReporter,
    cluster: &str,
) -> Result<()> {
    reporter.step(&format!("Check cluster '{cluster}'"));
    let info = orchestrator
        .describe_cluster(cluster)
        .await
        .with_context(|| format!("describing cluster '{cluster}'"))?
        .filter(ClusterInfo::is_active)
        .ok_or_else(|| DeployError::ClusterNotFound(cluster.to_owned()))?;
    tracing::debug!(cluster = %info.name, arn = ?info.arn, "cluster found");
    reporter.success(&format!("Cluster '{cluster}' check success"));
    Ok(())
}

async fn check_service(
    orchestrator: &impl ContainerOrchestrator,
    reporter: &impl ProgressReporter,
    cluster: &str,
    service: &str,
) -> Result<ServiceInfo> {
    reporter.step(&format!("Check service '{service}'"));
    let info = find_service(orchestrator, cluster, service).await?;
    tracing::debug!(service, running = info.running_count, desired = info.desired_count, "service found");
    reporter.success(&format!("Service '{service}' check success"));
    Ok(info)
}

async fn find_service(
    services: &impl ServiceManager,
    cluster: &str,
    service: &str,
) -> Result<ServiceInfo> {
    services
        .describe_service(cluster, service)
        .await
        .with_context(|| format!("describing service '{service}'"))?
        .filter(ServiceInfo::is_active)
        .ok_or_else(|| DeployError::ServiceNotFound(service.to_owned()).into())
}

/// Downscale, swap the task definition, upscale.
async fn roll_service(
    orchestrator: &impl ContainerOrchestrator,
    reporter: &impl ProgressReporter,
    plan: &DeploymentPlan,
    service: &str,
    running: i32,
    task_definition_arn: &str,
) -> Result<RolloutOutcome> {
    let cluster = plan.cluster.as_str();

    // Step 1: make room for the new revision.
    reporter.step(&format!("Downscaling service '{service}'"));
    let downscaled_to =
        downscale(orchestrator, reporter, cluster, service, running, plan.running_amount).await?;

    // Step 2: point the service at the new revision.
    reporter.step(&format!("Updating service '{service}'"));
    orchestrator
        .update_service(&ServiceUpdate {
            cluster: cluster.to_owned(),
            service: service.to_owned(),
            desired_count: None,
            task_definition: Some(task_definition_arn.to_owned()),
        })
        .await
        .with_context(|| format!("updating service '{service}'"))?;
    reporter.success(&format!("Service '{service}' updated"));

    // Step 3: scale to the requested amount.
    reporter.step(&format!("Upscaling service '{service}'"));
    let upscaled = orchestrator
        .update_service(&ServiceUpdate {
            cluster: cluster.to_owned(),
            service: service.to_owned(),
            desired_count: Some(plan.running_amount),
            task_definition: Some(task_definition_arn.to_owned()),
        })
        .await
        .with_context(|| format!("upscaling service '{service}'"))?;
    reporter.success(&format!(
        "Service '{service}' upscaled to {}",
        upscaled.desired_count
    ));

    Ok(RolloutOutcome::Service {
        service: service.to_owned(),
        previous_running: running,
        downscaled_to,
        desired_count: upscaled.desired_count,
        running_count: upscaled.running_count,
    })
}

/// Returns the new desired count, or `None` when the downscale was skipped.
async fn downscale(
    orchestrator: &impl ContainerOrchestrator,
    reporter: &impl ProgressReporter,
    cluster: &str,
    service: &str,
    running: i32,
    requested: i32,
) -> Result<Option<i32>> {
    const SKIPPED: &str = "Running tasks amount is less than requested. Downscaling skipped";

    if ScalePlan::decide(running, requested) == ScalePlan::Skip {
        reporter.success(SKIPPED);
        return Ok(None);
    }

    // Counts may have moved since the service check.
    let current = find_service(orchestrator, cluster, service).await?;
    let ScalePlan::Downscale { to, .. } = ScalePlan::decide(current.running_count, requested)
    else {
        reporter.warn(&format!(
            "Service '{service}' now runs {} task(s), fewer than requested",
            current.running_count
        ));
        reporter.success(SKIPPED);
        return Ok(None);
    };

    let updated = orchestrator
        .update_service(&ServiceUpdate {
            cluster: cluster.to_owned(),
            service: service.to_owned(),
            desired_count: Some(to),
            task_definition: current.task_definition.clone(),
        })
        .await
        .with_context(|| format!("downscaling service '{service}'"))?;
    reporter.success(&format!(
        "Service '{service}' downscaled from {running} to {}",
        updated.desired_count
    ));
    Ok(Some(updated.desired_count))
}

async fn run_one_off(
    orchestrator: &impl ContainerOrchestrator,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    plan: &DeploymentPlan,
    task_definition_arn: &str,
) -> Result<RolloutOutcome> {
    reporter.step("Run task");
    let launch = orchestrator
        .run_task(&plan.cluster, task_definition_arn)
        .await
        .with_context(|| format!("running task '{task_definition_arn}'"))?;
    ensure_no_failures(&launch)?;

    let task = launch.tasks.first().ok_or(DeployError::EmptyResponse {
        operation: "RunTask",
        what: "task",
    })?;
    tracing::info!(task = %task.arn, "task started");

    let polls = wait_until_running(
        orchestrator,
        clock,
        reporter,
        &WaitOptions {
            cluster: &plan.cluster,
            task_arn: &task.arn,
            poll_interval: plan.poll_interval,
            timeout: plan.wait_timeout,
        },
    )
    .await?;

    Ok(RolloutOutcome::Task {
        task_arn: task.arn.clone(),
        polls,
    })
}
