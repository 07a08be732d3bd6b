//! Amazon ECS implementation of the orchestrator ports.
//!
//! Every call is a single request/response; SDK output is mapped into
//! domain types before it leaves this module.

use std::collections::HashMap;

use anyhow::Result;
use aws_config::SdkConfig;
use aws_sdk_ecs::Client;
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::types as sdk;

use crate::application::ports::{
    ClusterInspector, ServiceManager, TaskDefinitionRegistry, TaskRunner,
};
use crate::domain::ecs::{
    ApiFailure, ClusterInfo, ServiceInfo, ServiceUpdate, TaskInfo, TaskLaunch, TaskStatus,
};
use crate::domain::error::DeployError;
use crate::domain::task_file::{
    ContainerDefinition, EnvironmentVariable, LogConfiguration, PortMapping,
};

/// Production orchestrator backed by the AWS SDK ECS client.
pub struct AwsEcsClient {
    client: Client,
}

impl AwsEcsClient {
    #[must_use]
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

/// SDK errors hide the service message behind `Display`; unwrap the chain.
fn sdk_error<E: std::error::Error + 'static>(err: E) -> anyhow::Error {
    anyhow::anyhow!("{}", DisplayErrorContext(err))
}

impl ClusterInspector for AwsEcsClient {
    async fn describe_cluster(&self, cluster: &str) -> Result<Option<ClusterInfo>> {
        tracing::debug!(cluster, "DescribeClusters");
        let output = self
            .client
            .describe_clusters()
            .clusters(cluster)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(output.clusters().first().map(cluster_info))
    }
}

impl ServiceManager for AwsEcsClient {
    async fn describe_service(&self, cluster: &str, service: &str) -> Result<Option<ServiceInfo>> {
        tracing::debug!(cluster, service, "DescribeServices");
        let output = self
            .client
            .describe_services()
            .cluster(cluster)
            .services(service)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(output.services().first().map(service_info))
    }

    async fn update_service(&self, update: &ServiceUpdate) -> Result<ServiceInfo> {
        tracing::debug!(
            cluster = %update.cluster,
            service = %update.service,
            desired_count = ?update.desired_count,
            task_definition = ?update.task_definition,
            "UpdateService"
        );
        let output = self
            .client
            .update_service()
            .cluster(&update.cluster)
            .service(&update.service)
            .set_desired_count(update.desired_count)
            .set_task_definition(update.task_definition.clone())
            .send()
            .await
            .map_err(sdk_error)?;
        output.service().map(service_info).ok_or_else(|| {
            DeployError::EmptyResponse {
                operation: "UpdateService",
                what: "service",
            }
            .into()
        })
    }
}

impl TaskDefinitionRegistry for AwsEcsClient {
    async fn register_task_definition(
        &self,
        family: &str,
        containers: &[ContainerDefinition],
    ) -> Result<String> {
        tracing::debug!(family, containers = containers.len(), "RegisterTaskDefinition");
        let definitions = containers
            .iter()
            .map(container_definition)
            .collect::<Result<Vec<_>>>()?;
        let output = self
            .client
            .register_task_definition()
            .family(family)
            .set_container_definitions(Some(definitions))
            .send()
            .await
            .map_err(sdk_error)?;
        output
            .task_definition()
            .and_then(sdk::TaskDefinition::task_definition_arn)
            .map(str::to_owned)
            .ok_or_else(|| {
                DeployError::EmptyResponse {
                    operation: "RegisterTaskDefinition",
                    what: "task definition ARN",
                }
                .into()
            })
    }
}

impl TaskRunner for AwsEcsClient {
    async fn run_task(&self, cluster: &str, task_definition: &str) -> Result<TaskLaunch> {
        tracing::debug!(cluster, task_definition, "RunTask");
        let output = self
            .client
            .run_task()
            .cluster(cluster)
            .task_definition(task_definition)
            .count(1)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(task_launch(output.tasks(), output.failures()))
    }

    async fn describe_task(&self, cluster: &str, task_arn: &str) -> Result<TaskLaunch> {
        tracing::trace!(cluster, task_arn, "DescribeTasks");
        let output = self
            .client
            .describe_tasks()
            .cluster(cluster)
            .tasks(task_arn)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(task_launch(output.tasks(), output.failures()))
    }
}

// ── Response mapping ──────────────────────────────────────────────────────────

fn cluster_info(cluster: &sdk::Cluster) -> ClusterInfo {
    ClusterInfo {
        name: cluster.cluster_name().unwrap_or_default().to_owned(),
        arn: cluster.cluster_arn().map(str::to_owned),
        status: cluster.status().map(str::to_owned),
    }
}

fn service_info(service: &sdk::Service) -> ServiceInfo {
    ServiceInfo {
        name: service.service_name().unwrap_or_default().to_owned(),
        status: service.status().map(str::to_owned),
        running_count: service.running_count(),
        desired_count: service.desired_count(),
        task_definition: service.task_definition().map(str::to_owned),
    }
}

fn task_launch(tasks: &[sdk::Task], failures: &[sdk::Failure]) -> TaskLaunch {
    TaskLaunch {
        tasks: tasks
            .iter()
            .map(|task| TaskInfo {
                arn: task.task_arn().unwrap_or_default().to_owned(),
                last_status: TaskStatus::parse(task.last_status().unwrap_or_default()),
                stopped_reason: task.stopped_reason().map(str::to_owned),
            })
            .collect(),
        failures: failures
            .iter()
            .map(|failure| ApiFailure {
                arn: failure.arn().map(str::to_owned),
                reason: failure.reason().map(str::to_owned),
                detail: failure.detail().map(str::to_owned),
            })
            .collect(),
    }
}

// ── Request mapping ───────────────────────────────────────────────────────────

fn container_definition(def: &ContainerDefinition) -> Result<sdk::ContainerDefinition> {
    let log_configuration = def
        .log_configuration
        .as_ref()
        .map(log_configuration)
        .transpose()?;

    Ok(sdk::ContainerDefinition::builder()
        .name(&def.name)
        .image(&def.image)
        .set_cpu(def.cpu)
        .set_memory(def.memory)
        .set_memory_reservation(def.memory_reservation)
        .essential(def.essential)
        .set_port_mappings(non_empty(def.port_mappings.iter().map(port_mapping).collect()))
        .set_environment(non_empty(def.environment.iter().map(key_value).collect()))
        .set_command(non_empty(def.command.clone()))
        .set_entry_point(non_empty(def.entry_point.clone()))
        .set_links(non_empty(def.links.clone()))
        .set_working_directory(def.working_directory.clone())
        .set_hostname(def.hostname.clone())
        .set_log_configuration(log_configuration)
        .build())
}

fn port_mapping(mapping: &PortMapping) -> sdk::PortMapping {
    sdk::PortMapping::builder()
        .container_port(mapping.container_port)
        .set_host_port(mapping.host_port)
        .set_protocol(mapping.protocol.as_deref().map(sdk::TransportProtocol::from))
        .build()
}

fn key_value(var: &EnvironmentVariable) -> sdk::KeyValuePair {
    sdk::KeyValuePair::builder()
        .name(&var.name)
        .value(&var.value)
        .build()
}

fn log_configuration(config: &LogConfiguration) -> Result<sdk::LogConfiguration> {
    let options: HashMap<String, String> = config
        .options
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Ok(sdk::LogConfiguration::builder()
        .log_driver(sdk::LogDriver::from(config.log_driver.as_str()))
        .set_options((!options.is_empty()).then_some(options))
        .build()?)
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
