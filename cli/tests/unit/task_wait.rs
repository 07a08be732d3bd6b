//! Tests for the one-off task startup wait.

#![allow(clippy::expect_used)]

use std::time::Duration;

use ecs_deploy_cli::application::services::task_wait::{
    WaitOptions, ensure_no_failures, wait_until_running,
};
use ecs_deploy_cli::domain::{DeployError, TaskLaunch, TaskStatus};

use crate::mocks::{
    CLUSTER, MockOrchestrator, RecordingClock, RecordingReporter, TASK_ARN, failed, launch,
    stopped,
};

fn options(timeout: Option<Duration>) -> WaitOptions<'static> {
    WaitOptions {
        cluster: CLUSTER,
        task_arn: TASK_ARN,
        poll_interval: Duration::from_secs(2),
        timeout,
    }
}

#[tokio::test]
async fn running_on_first_poll_never_sleeps() {
    let ecs = MockOrchestrator::new().with_statuses(vec![launch(TaskStatus::Running)]);
    let clock = RecordingClock::default();
    let reporter = RecordingReporter::default();

    let polls = wait_until_running(&ecs, &clock, &reporter, &options(None))
        .await
        .expect("wait");

    assert_eq!(polls, 1);
    assert!(clock.sleeps().is_empty());
    assert_eq!(reporter.events(), vec!["success: Task is running"]);
}

#[tokio::test]
async fn sleeps_poll_interval_between_checks() {
    let ecs = MockOrchestrator::new().with_statuses(vec![
        launch(TaskStatus::Pending),
        launch(TaskStatus::Activating),
        launch(TaskStatus::Running),
    ]);
    let clock = RecordingClock::default();
    let reporter = RecordingReporter::default();

    let polls = wait_until_running(&ecs, &clock, &reporter, &options(None))
        .await
        .expect("wait");

    assert_eq!(polls, 3);
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(2); 2]);
    assert_eq!(
        reporter.events(),
        vec![
            "info: Task status is 'PENDING'. Waiting...",
            "info: Task status is 'ACTIVATING'. Waiting...",
            "success: Task is running",
        ]
    );
}

#[tokio::test]
async fn gives_up_once_timeout_elapsed() {
    let ecs = MockOrchestrator::new().with_statuses(vec![launch(TaskStatus::Pending); 5]);
    let clock = RecordingClock::default();

    let err = wait_until_running(
        &ecs,
        &clock,
        &RecordingReporter::default(),
        &options(Some(Duration::from_secs(4))),
    )
    .await
    .expect_err("timeout");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::WaitTimedOut { seconds: 4, status, .. }) if status == "PENDING"
    ));
    assert_eq!(clock.sleeps().len(), 2);
}

#[tokio::test]
async fn stopped_task_reports_reason() {
    let ecs = MockOrchestrator::new().with_statuses(vec![stopped("CannotPullContainerError")]);

    let err = wait_until_running(
        &ecs,
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &options(None),
    )
    .await
    .expect_err("stopped");

    assert!(err.to_string().contains("CannotPullContainerError"));
}

#[tokio::test]
async fn describe_failure_aborts_wait() {
    let ecs = MockOrchestrator::new().with_statuses(vec![failed(TASK_ARN, "MISSING")]);

    let err = wait_until_running(
        &ecs,
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &options(None),
    )
    .await
    .expect_err("failure");

    assert_eq!(err.to_string(), format!("Task '{TASK_ARN}' failed: MISSING"));
}

#[tokio::test]
async fn empty_describe_response_is_an_error() {
    let ecs = MockOrchestrator::new().with_statuses(vec![TaskLaunch::default()]);

    let err = wait_until_running(
        &ecs,
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &options(None),
    )
    .await
    .expect_err("empty");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::EmptyResponse { .. })
    ));
}

#[tokio::test]
async fn huge_poll_interval_does_not_overflow() {
    let ecs = MockOrchestrator::new().with_statuses(vec![
        launch(TaskStatus::Pending),
        launch(TaskStatus::Pending),
        launch(TaskStatus::Running),
    ]);
    let clock = RecordingClock::default();
    let opts = WaitOptions {
        poll_interval: Duration::MAX,
        ..options(None)
    };

    let polls = wait_until_running(&ecs, &clock, &RecordingReporter::default(), &opts)
        .await
        .expect("wait");

    assert_eq!(polls, 3);
    assert_eq!(clock.sleeps(), vec![Duration::MAX; 2]);
}

#[tokio::test]
async fn huge_poll_interval_still_honours_timeout() {
    let ecs = MockOrchestrator::new().with_statuses(vec![launch(TaskStatus::Pending); 3]);
    let opts = WaitOptions {
        poll_interval: Duration::MAX,
        ..options(Some(Duration::from_secs(60)))
    };

    let err = wait_until_running(
        &ecs,
        &RecordingClock::default(),
        &RecordingReporter::default(),
        &opts,
    )
    .await
    .expect_err("timeout");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::WaitTimedOut { seconds: 60, .. })
    ));
}

#[test]
fn ensure_no_failures_passes_clean_launch() {
    assert!(ensure_no_failures(&launch(TaskStatus::Pending)).is_ok());
}
