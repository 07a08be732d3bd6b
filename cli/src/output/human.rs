//! Human-readable terminal renderer.

use std::path::Path;

use crate::domain::report::{DeployReport, RolloutOutcome};
use crate::domain::task_file::ContainerDefinition;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("ecs-deploy {version}");
    }

    /// Render the summary printed after a successful deployment.
    pub fn render_report(&self, report: &DeployReport) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.header("Deployment complete");
        self.ctx.kv("Cluster:", &report.cluster);
        self.ctx.kv("Task definition:", &report.task_definition_arn);
        match &report.outcome {
            RolloutOutcome::Task { task_arn, .. } => {
                self.ctx.kv("Task:", task_arn);
            }
            RolloutOutcome::Service {
                service,
                desired_count,
                ..
            } => {
                self.ctx.kv("Service:", service);
                self.ctx.kv("Desired count:", &desired_count.to_string());
            }
        }
        let elapsed = report.finished_at - report.started_at;
        self.ctx
            .kv("Elapsed:", &format!("{}s", elapsed.num_seconds().max(0)));
    }

    /// Render the containers of a validated task file.
    pub fn render_task_file(&self, path: &Path, containers: &[ContainerDefinition]) {
        if self.ctx.quiet {
            return;
        }
        self.ctx
            .success(&format!("{} is a valid task file", path.display()));
        for container in containers {
            let marker = if container.essential { "" } else { "  (non-essential)" };
            println!("    {:<20} {}{marker}", container.name, container.image);
        }
    }
}
