//! `ecs-deploy deploy` — register a task definition and roll it out.

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{ConfigStore, ProgressReporter};
use crate::application::services::deploy as service;
use crate::domain::config::DeployConfig;
use crate::domain::plan::{DeployRequest, DeploymentPlan};
use crate::infra::aws::{ClientSettings, load_sdk_config};
use crate::infra::clock::TokioClock;
use crate::infra::ecs::AwsEcsClient;
use crate::infra::fs::LocalFs;
use crate::output::json;

/// Arguments for the deploy command.
#[derive(Args, Debug, Default, Clone)]
pub struct DeployArgs {
    /// AWS access key id (default: AWS credential chain)
    #[arg(short, long)]
    pub key: Option<String>,

    /// AWS secret access key
    #[arg(short, long)]
    pub secret: Option<String>,

    /// AWS region
    #[arg(short, long, env = "ECS_DEPLOY_REGION")]
    pub region: Option<String>,

    /// Target cluster
    #[arg(long, env = "ECS_DEPLOY_CLUSTER")]
    pub cluster: Option<String>,

    /// Service to update; without it a one-off task is run
    #[arg(long)]
    pub service: Option<String>,

    /// Task definition family
    #[arg(long, value_name = "FAMILY")]
    pub task: Option<String>,

    /// JSON or YAML file with the container definitions
    #[arg(long, value_name = "PATH")]
    pub task_file: Option<String>,

    /// Number of tasks the service should run [default: 1]
    #[arg(long, value_name = "COUNT")]
    pub running_amount: Option<i32>,

    /// Seconds between task status checks [default: 5]
    #[arg(long, value_name = "SECONDS")]
    pub poll_interval: Option<u64>,

    /// Give up waiting for the task to start after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub wait_timeout: Option<u64>,

    /// Custom ECS endpoint, e.g. http://localhost:4566
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,
}

impl DeployArgs {
    /// Raw request from the flags alone.
    #[must_use]
    pub fn to_request(&self) -> DeployRequest {
        DeployRequest {
            cluster: self.cluster.clone(),
            service: self.service.clone(),
            family: self.task.clone(),
            task_file: self.task_file.clone(),
            running_amount: self.running_amount,
            poll_interval_secs: self.poll_interval,
            wait_timeout_secs: self.wait_timeout,
        }
    }

    /// Client settings, with region and endpoint falling back to `config`.
    #[must_use]
    pub fn client_settings(&self, config: &DeployConfig) -> ClientSettings {
        ClientSettings {
            access_key: self.key.clone(),
            secret_key: self.secret.clone(),
            region: self.region.clone().or_else(|| config.region.clone()),
            endpoint_url: self
                .endpoint_url
                .clone()
                .or_else(|| config.endpoint_url.clone()),
        }
    }
}

/// Run `ecs-deploy deploy`.
///
/// # Errors
///
/// Returns an error if options are invalid or any deployment step fails.
pub async fn run(args: &DeployArgs, app: &AppContext) -> Result<()> {
    let config = app.config.load().context("loading configuration")?;
    let request = config.apply_defaults(args.to_request());
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let plan = DeploymentPlan::from_request(&request, &cwd)?;

    app.output.header("Deploying task to AWS");
    let reporter = app.terminal_reporter();

    reporter.step("Configure AWS client");
    let sdk_config = load_sdk_config(&args.client_settings(&config)).await?;
    let client = AwsEcsClient::new(&sdk_config);
    reporter.success("Client config success");

    let report = service::deploy(&client, &LocalFs, &TokioClock, &reporter, &plan).await?;
    drop(reporter);

    if app.is_json() {
        println!("{}", json::format_report(&report)?);
    } else {
        app.human().render_report(&report);
    }
    Ok(())
}
