use async_trait::async_trait;
use bollard::container::{InspectContainerOptions, ListContainersOptions};
use bollard::models::ContainerSummary;
use bollard::Docker;

use crate::docker::inspect::record_from_inspect;
use crate::engine::ContainerRecord;
use crate::error::SnapshotError;

// ======================================================
// CONTAINER SOURCE
// ======================================================

/// A running container as listed by the daemon, before inspection.
#[derive(Debug, Clone)]
pub struct ContainerHandle {
    pub id: String,
    pub name: String,
}

/// Where container data comes from. The live daemon is the only
/// production implementation; tests substitute canned records.
#[async_trait]
pub trait ContainerSource {
    async fn list_running(&self) -> Result<Vec<ContainerHandle>, SnapshotError>;
    async fn inspect(&self, id: &str) -> Result<ContainerRecord, SnapshotError>;
}

pub struct DockerSource {
    docker: Docker,
}

impl DockerSource {
    /// Connect using the standard environment (DOCKER_HOST or the
    /// local socket).
    pub fn connect() -> Result<DockerSource, SnapshotError> {
        let docker = Docker::connect_with_local_defaults()
            .map_err(SnapshotError::DaemonUnavailable)?;
        Ok(DockerSource { docker })
    }
}

#[async_trait]
impl ContainerSource for DockerSource {
    async fn list_running(&self) -> Result<Vec<ContainerHandle>, SnapshotError> {
        let options = ListContainersOptions::<String> {
            all: false,
            ..Default::default()
        };
        let summaries = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(SnapshotError::ListContainers)?;

        Ok(summaries
            .into_iter()
            .filter_map(handle_from_summary)
            .collect())
    }

    async fn inspect(&self, id: &str) -> Result<ContainerRecord, SnapshotError> {
        let container = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(|e| SnapshotError::Inspect {
                id: id.to_string(),
                source: e,
            })?;
        Ok(record_from_inspect(container))
    }
}

fn handle_from_summary(summary: ContainerSummary) -> Option<ContainerHandle> {
    let id = summary.id.filter(|id| !id.is_empty())?;
    let name = summary
        .names
        .and_then(|names| names.into_iter().next())
        .map(|name| name.trim_start_matches('/').to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| id.chars().take(12).collect());
    Some(ContainerHandle { id, name })
}
