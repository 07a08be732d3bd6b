//! Container definitions loaded from the task file.
//!
//! Pure parsing and validation — no I/O, no async.
//!
//! Accepts either a bare list of container definitions or an object with a
//! `containerDefinitions` key, the shape produced by
//! `aws ecs describe-task-definition`. Keys use the ECS camelCase spelling.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::error::TaskFileError;

/// One container of the task definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_reservation: Option<i32>,
    #[serde(default = "default_essential")]
    pub essential: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub port_mappings: Vec<PortMapping>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<EnvironmentVariable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry_point: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_configuration: Option<LogConfiguration>,
}

fn default_essential() -> bool {
    true
}

/// Port published by a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    pub container_port: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Plain environment variable passed to a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

/// Log driver settings, e.g. `awslogs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfiguration {
    pub log_driver: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

/// Serialization format of a task file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFileFormat {
    Json,
    Yaml,
    /// Unknown extension: try JSON, then YAML.
    Auto,
}

impl TaskFileFormat {
    /// Pick the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Auto,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TaskFileShape {
    List(Vec<ContainerDefinition>),
    #[serde(rename_all = "camelCase")]
    Wrapped {
        container_definitions: Vec<ContainerDefinition>,
    },
}

impl TaskFileShape {
    fn into_containers(self) -> Vec<ContainerDefinition> {
        match self {
            Self::List(list) | Self::Wrapped { container_definitions: list } => list,
        }
    }
}

/// Parse and validate container definitions.
///
/// # Errors
///
/// Returns a `TaskFileError` when the content cannot be parsed or does not
/// describe a usable task.
pub fn parse_container_definitions(
    content: &str,
    format: TaskFileFormat,
) -> Result<Vec<ContainerDefinition>, TaskFileError> {
    let shape = match format {
        TaskFileFormat::Json => parse_json(content)?,
        TaskFileFormat::Yaml => parse_yaml(content)?,
        TaskFileFormat::Auto => match parse_json(content) {
            Ok(shape) => shape,
            Err(_) => parse_yaml(content)?,
        },
    };
    let containers = shape.into_containers();
    validate_containers(&containers)?;
    Ok(containers)
}

fn parse_json(content: &str) -> Result<TaskFileShape, TaskFileError> {
    serde_json::from_str(content).map_err(|e| TaskFileError::Parse {
        format: "JSON",
        message: e.to_string(),
    })
}

fn parse_yaml(content: &str) -> Result<TaskFileShape, TaskFileError> {
    serde_yaml::from_str(content).map_err(|e| TaskFileError::Parse {
        format: "YAML",
        message: e.to_string(),
    })
}

/// Check the rules ECS enforces on registration, before any API call.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_containers(containers: &[ContainerDefinition]) -> Result<(), TaskFileError> {
    if containers.is_empty() {
        return Err(TaskFileError::Empty);
    }

    let mut seen = HashSet::new();
    for (index, container) in containers.iter().enumerate() {
        if container.name.trim().is_empty() {
            return Err(TaskFileError::MissingField {
                index: index + 1,
                field: "name",
            });
        }
        if container.image.trim().is_empty() {
            return Err(TaskFileError::MissingField {
                index: index + 1,
                field: "image",
            });
        }
        if !seen.insert(container.name.as_str()) {
            return Err(TaskFileError::DuplicateName(container.name.clone()));
        }
    }

    if !containers.iter().any(|c| c.essential) {
        return Err(TaskFileError::NoEssentialContainer);
    }
    Ok(())
}
