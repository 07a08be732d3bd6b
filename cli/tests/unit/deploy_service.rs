//! Tests for the `deploy` application service.
//!
//! Every test drives the workflow against `MockOrchestrator` and asserts on
//! the exact API call sequence and the parameters passed along.

#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::time::Duration;

use ecs_deploy_cli::application::services::deploy::deploy;
use ecs_deploy_cli::domain::{
    DeployError, DeployMode, DeploymentPlan, RolloutOutcome, ServiceUpdate, TaskStatus,
};

use crate::mocks::{
    CLUSTER, Call, MemoryFiles, MockOrchestrator, OLD_TASK_DEF, RecordingClock,
    RecordingReporter, TASK_ARN, TASK_FILE, failed, launch, registered_arn, stopped,
};

fn plan(mode: DeployMode, running_amount: i32) -> DeploymentPlan {
    DeploymentPlan {
        cluster: CLUSTER.to_owned(),
        mode,
        family: "web".to_owned(),
        task_file: PathBuf::from(TASK_FILE),
        running_amount,
        poll_interval: Duration::from_secs(5),
        wait_timeout: None,
    }
}

fn service_mode(running_amount: i32) -> DeploymentPlan {
    plan(
        DeployMode::Service {
            name: "api".to_owned(),
        },
        running_amount,
    )
}

fn update(desired_count: Option<i32>, task_definition: &str) -> ServiceUpdate {
    ServiceUpdate {
        cluster: CLUSTER.to_owned(),
        service: "api".to_owned(),
        desired_count,
        task_definition: Some(task_definition.to_owned()),
    }
}

fn describe_service() -> Call {
    Call::DescribeService {
        cluster: CLUSTER.to_owned(),
        service: "api".to_owned(),
    }
}

fn register_web() -> Call {
    Call::Register {
        family: "web".to_owned(),
        containers: vec!["web".to_owned()],
    }
}

// ── Service mode ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn service_at_capacity_downscales_swaps_and_upscales() {
    let ecs = MockOrchestrator::new().with_service("api", 2);
    let reporter = RecordingReporter::default();
    let new_arn = registered_arn("web");

    let report = deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &RecordingClock::default(),
        &reporter,
        &service_mode(2),
    )
    .await
    .expect("deploy");

    assert_eq!(
        ecs.calls(),
        vec![
            Call::DescribeCluster(CLUSTER.to_owned()),
            describe_service(),
            register_web(),
            describe_service(),
            Call::UpdateService(update(Some(1), OLD_TASK_DEF)),
            Call::UpdateService(update(None, &new_arn)),
            Call::UpdateService(update(Some(2), &new_arn)),
        ]
    );
    assert_eq!(report.task_definition_arn, new_arn);
    assert_eq!(report.containers, 1);
    assert_eq!(
        report.outcome,
        RolloutOutcome::Service {
            service: "api".to_owned(),
            previous_running: 2,
            downscaled_to: Some(1),
            desired_count: 2,
            running_count: 2,
        }
    );
    assert!(reporter.contains("success: Service 'api' downscaled from 2 to 1"));
    assert!(reporter.contains("success: Service 'api' updated"));
    assert!(reporter.contains("success: Service 'api' upscaled to 2"));
}

#[tokio::test]
async fn service_below_requested_skips_downscale() {
    let ecs = MockOrchestrator::new().with_service("api", 1);
    let reporter = RecordingReporter::default();
    let new_arn = registered_arn("web");

    let report = deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &RecordingClock::default(),
        &reporter,
        &service_mode(3),
    )
    .await
    .expect("deploy");

    assert_eq!(
        ecs.updates(),
        vec![update(None, &new_arn), update(Some(3), &new_arn)]
    );
    let describes = ecs
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::DescribeService { .. }))
        .count();
    assert_eq!(describes, 1, "no re-describe when downscale is skipped");
    assert!(reporter.contains(
        "success: Running tasks amount is less than requested. Downscaling skipped"
    ));
    assert!(matches!(
        report.outcome,
        RolloutOutcome::Service {
            downscaled_to: None,
            desired_count: 3,
            ..
        }
    ));
}

#[tokio::test]
async fn service_with_single_task_downscales_to_zero() {
    let ecs = MockOrchestrator::new().with_service("api", 1);

    deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &service_mode(1),
    )
    .await
    .expect("deploy");

    assert_eq!(ecs.updates()[0], update(Some(0), OLD_TASK_DEF));
}

#[tokio::test]
async fn downscale_skipped_when_tasks_drop_before_update() {
    let ecs = MockOrchestrator::new()
        .with_service("api", 2)
        .with_running_counts(vec![2, 1]);
    let reporter = RecordingReporter::default();
    let new_arn = registered_arn("web");

    let report = deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &RecordingClock::default(),
        &reporter,
        &service_mode(2),
    )
    .await
    .expect("deploy");

    assert_eq!(
        ecs.updates(),
        vec![update(None, &new_arn), update(Some(2), &new_arn)]
    );
    assert!(reporter.contains("warn: Service 'api' now runs 1 task(s), fewer than requested"));
    assert!(reporter.contains(
        "success: Running tasks amount is less than requested. Downscaling skipped"
    ));
    assert!(matches!(
        report.outcome,
        RolloutOutcome::Service {
            previous_running: 2,
            downscaled_to: None,
            ..
        }
    ));
}

#[tokio::test]
async fn downscale_uses_fresh_running_count() {
    let ecs = MockOrchestrator::new()
        .with_service("api", 2)
        .with_running_counts(vec![2, 4]);

    deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &service_mode(2),
    )
    .await
    .expect("deploy");

    assert_eq!(ecs.updates()[0], update(Some(3), OLD_TASK_DEF));
}

#[tokio::test]
async fn inactive_service_counts_as_missing() {
    let ecs = MockOrchestrator::new()
        .with_service("api", 2)
        .with_service_status("INACTIVE");

    let err = deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &service_mode(1),
    )
    .await
    .expect_err("inactive service");

    assert_eq!(err.to_string(), "Service 'api' not found");
    assert!(
        !ecs.calls()
            .iter()
            .any(|c| matches!(c, Call::Register { .. }))
    );
}

#[tokio::test]
async fn missing_service_aborts_before_registration() {
    let ecs = MockOrchestrator::new();

    let err = deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &service_mode(1),
    )
    .await
    .expect_err("missing service");

    assert_eq!(err.to_string(), "Service 'api' not found");
    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::ServiceNotFound(_))
    ));
    assert_eq!(ecs.calls().len(), 2);
}

// ── Cluster and task file checks ──────────────────────────────────────────────

#[tokio::test]
async fn missing_cluster_aborts_immediately() {
    let ecs = MockOrchestrator::new().without_cluster();

    let err = deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &plan(DeployMode::OneOff, 1),
    )
    .await
    .expect_err("missing cluster");

    assert_eq!(err.to_string(), "Cluster named 'prod' not found");
    assert_eq!(ecs.calls(), vec![Call::DescribeCluster(CLUSTER.to_owned())]);
}

#[tokio::test]
async fn inactive_cluster_counts_as_missing() {
    let ecs = MockOrchestrator::new().with_cluster_status("INACTIVE");

    let err = deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &plan(DeployMode::OneOff, 1),
    )
    .await
    .expect_err("inactive cluster");

    assert_eq!(err.to_string(), "Cluster named 'prod' not found");
}

#[tokio::test]
async fn missing_task_file_aborts_before_registration() {
    let ecs = MockOrchestrator::new();

    let err = deploy(
        &ecs,
        &MemoryFiles::empty(),
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &plan(DeployMode::OneOff, 1),
    )
    .await
    .expect_err("missing file");

    assert_eq!(err.to_string(), "File not found in path: /work/task.json");
    assert!(
        !ecs.calls()
            .iter()
            .any(|c| matches!(c, Call::Register { .. }))
    );
}

#[tokio::test]
async fn invalid_task_file_aborts_before_registration() {
    let ecs = MockOrchestrator::new();
    let files = MemoryFiles::empty().with(TASK_FILE, r#"[{"name": "web"}]"#);

    let err = deploy(
        &ecs,
        &files,
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &plan(DeployMode::OneOff, 1),
    )
    .await
    .expect_err("invalid file");

    assert!(format!("{err:#}").contains("Container #1 has no image"));
    assert_eq!(ecs.calls().len(), 1);
}

// ── One-off mode ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn one_off_runs_registered_revision_and_waits_for_running() {
    let ecs = MockOrchestrator::new().with_statuses(vec![
        launch(TaskStatus::Provisioning),
        launch(TaskStatus::Pending),
        launch(TaskStatus::Running),
    ]);
    let clock = RecordingClock::default();
    let reporter = RecordingReporter::default();

    let report = deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &clock,
        &reporter,
        &plan(DeployMode::OneOff, 1),
    )
    .await
    .expect("deploy");

    let calls = ecs.calls();
    assert_eq!(
        calls[2],
        Call::RunTask {
            cluster: CLUSTER.to_owned(),
            task_definition: registered_arn("web"),
        }
    );
    assert_eq!(
        calls[3],
        Call::DescribeTask {
            cluster: CLUSTER.to_owned(),
            task_arn: TASK_ARN.to_owned(),
        }
    );
    assert_eq!(calls.len(), 6);
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(5); 2]);
    assert!(reporter.contains("info: Task status is 'PENDING'. Waiting..."));
    assert!(reporter.contains("success: Task is running"));
    assert_eq!(
        report.outcome,
        RolloutOutcome::Task {
            task_arn: TASK_ARN.to_owned(),
            polls: 3,
        }
    );
}

#[tokio::test]
async fn one_off_run_failure_is_reported() {
    let ecs = MockOrchestrator::new().with_run(failed(
        "arn:aws:ecs:eu-west-1:123456789012:container-instance/abc",
        "RESOURCE:MEMORY",
    ));

    let err = deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &plan(DeployMode::OneOff, 1),
    )
    .await
    .expect_err("run failure");

    assert_eq!(
        err.to_string(),
        "Task 'arn:aws:ecs:eu-west-1:123456789012:container-instance/abc' failed: RESOURCE:MEMORY"
    );
    assert!(
        !ecs.calls()
            .iter()
            .any(|c| matches!(c, Call::DescribeTask { .. }))
    );
}

#[tokio::test]
async fn one_off_task_stopping_during_startup_fails() {
    let ecs = MockOrchestrator::new().with_statuses(vec![
        launch(TaskStatus::Pending),
        stopped("Essential container in task exited"),
    ]);

    let err = deploy(
        &ecs,
        &MemoryFiles::with_web_task(),
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &plan(DeployMode::OneOff, 1),
    )
    .await
    .expect_err("stopped task");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::TaskStopped { reason, .. }) if reason == "Essential container in task exited"
    ));
}
